//! TYPO3 commit guidelines preset.

use verbump_version::VersionRange;

use super::{Preset, commit_message_indicator};
use crate::{ConfigResult, VersionBumperConfig};

/// Detects version ranges from `[!!!]`, `[FEATURE]`, `[BUGFIX]`, `[DOCS]`
/// and `[TASK]` commit prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Typo3CommitGuidelinesPreset;

impl Typo3CommitGuidelinesPreset {
    pub const IDENTIFIER: &'static str = "typo3-commit-guidelines";
}

impl Preset for Typo3CommitGuidelinesPreset {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "TYPO3 guidelines for commit messages"
    }

    fn config(&self, _root: &VersionBumperConfig) -> ConfigResult<VersionBumperConfig> {
        Ok(VersionBumperConfig::new()
            .with_indicator(commit_message_indicator(VersionRange::Major, r"^\[!!!\]")?)
            .with_indicator(commit_message_indicator(VersionRange::Minor, r"^\[FEATURE\]")?)
            .with_indicator(commit_message_indicator(
                VersionRange::Patch,
                r"^\[(BUGFIX|DOCS|TASK)\]",
            )?))
    }
}
