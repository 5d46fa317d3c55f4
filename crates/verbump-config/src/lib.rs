//! Configuration management for verbump.
//!
//! This crate turns `version-bumper.{json,yaml,yml,toml}` files into a
//! [`VersionBumperConfig`]: the files to modify, the indicators used to
//! detect a version range, and the release options. Presets contribute
//! pre-built fragments for common project layouts.

mod config;
mod error;
mod file;
mod file_pattern;
mod indicator;
mod loader;
pub mod preset;
mod release;
mod schema;

pub use config::VersionBumperConfig;
pub use error::{ConfigError, ConfigResult};
pub use file::FileToModify;
pub use file_pattern::FilePattern;
pub use indicator::{IndicatorStrategy, IndicatorType, VersionRangeIndicator, VersionRangePattern};
pub use loader::{CONFIG_FILE_NAMES, detect_file, read_from_file};
pub use preset::{Preset, PresetFactory};
pub use release::ReleaseOptions;
pub use schema::PresetEntry;
