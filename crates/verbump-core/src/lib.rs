//! Core library for verbump.
//!
//! This crate provides the three steps of a release:
//! - [`VersionBumper`]: Rewrites version strings in the configured files
//! - [`VersionRangeDetector`]: Picks a version range from git history
//! - [`VersionReleaser`]: Commits the modified files and tags the release

mod bumper;
mod detector;
mod error;
mod releaser;
mod result;

pub use bumper::VersionBumper;
pub use detector::VersionRangeDetector;
pub use error::{CoreError, CoreResult};
pub use releaser::VersionReleaser;
pub use result::{OperationState, VersionBumpResult, VersionReleaseResult, WriteOperation};
