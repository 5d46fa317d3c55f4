//! CLI commands.

pub mod bump;
pub mod presets;

/// Exit code for invalid invocations.
pub const EXIT_INVALID: u8 = 2;
