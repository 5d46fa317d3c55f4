//! Conventional Commits preset.

use verbump_version::VersionRange;

use super::{Preset, commit_message_indicator};
use crate::{ConfigResult, VersionBumperConfig};

const MAJOR: &str = r"^[a-z]+(\([\w\-\.]+\))?!:";
const MINOR: &str = r"^feat(\([\w\-\.]+\))?:";
const PATCH: &str = r"^(build|chore|ci|docs|fix|perf|refactor|revert|style|test)(\([\w\-\.]+\))?:";

/// Detects version ranges from Conventional Commits 1.0.0 messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalCommitsPreset;

impl ConventionalCommitsPreset {
    pub const IDENTIFIER: &'static str = "conventional-commits";
}

impl Preset for ConventionalCommitsPreset {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Conventional Commits 1.0.0"
    }

    fn config(&self, _root: &VersionBumperConfig) -> ConfigResult<VersionBumperConfig> {
        Ok(VersionBumperConfig::new()
            .with_indicator(commit_message_indicator(VersionRange::Major, MAJOR)?)
            .with_indicator(commit_message_indicator(VersionRange::Minor, MINOR)?)
            .with_indicator(commit_message_indicator(VersionRange::Patch, PATCH)?))
    }
}
