//! Version types for verbump.
//!
//! This crate provides the value types shared by every other verbump crate:
//! - [`Version`]: A `major.minor.patch` version
//! - [`VersionRange`]: The range tier used to increase a version
//! - [`VersionTarget`]: Either a range or an explicit version to bump to
//! - Helpers for the `{%version%}` placeholder

mod error;
mod placeholder;
mod range;
mod target;
mod version;

pub use error::{VersionError, VersionResult};
pub use placeholder::{VERSION_PLACEHOLDER, is_valid_version_pattern, replace_version_in_pattern};
pub use range::VersionRange;
pub use target::VersionTarget;
pub use version::Version;
