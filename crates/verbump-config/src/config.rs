//! Materialized configuration.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::schema::{RawConfig, RawFileToModify, RawVersionRangeIndicator};
use crate::{
    ConfigResult, FilePattern, FileToModify, PresetEntry, PresetFactory, ReleaseOptions,
    VersionRangeIndicator, VersionRangePattern,
};

/// Validated configuration for a bump and release run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionBumperConfig {
    presets: Vec<PresetEntry>,
    files_to_modify: Vec<FileToModify>,
    release_options: ReleaseOptions,
    root_path: Option<PathBuf>,
    version_range_indicators: Vec<VersionRangeIndicator>,
}

impl VersionBumperConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to modify.
    #[must_use]
    pub fn with_file(mut self, file: FileToModify) -> Self {
        self.files_to_modify.push(file);
        self
    }

    /// Adds a version range indicator.
    #[must_use]
    pub fn with_indicator(mut self, indicator: VersionRangeIndicator) -> Self {
        self.version_range_indicators.push(indicator);
        self
    }

    /// Adds a preset reference, resolved by [`Self::apply_presets`].
    #[must_use]
    pub fn with_preset(mut self, preset: PresetEntry) -> Self {
        self.presets.push(preset);
        self
    }

    /// Sets the release options.
    #[must_use]
    pub fn with_release_options(mut self, release_options: ReleaseOptions) -> Self {
        self.release_options = release_options;
        self
    }

    /// Sets the root path.
    #[must_use]
    pub fn with_root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.root_path = Some(root_path.into());
        self
    }

    #[must_use]
    pub fn files_to_modify(&self) -> &[FileToModify] {
        &self.files_to_modify
    }

    #[must_use]
    pub fn release_options(&self) -> &ReleaseOptions {
        &self.release_options
    }

    #[must_use]
    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    pub fn set_root_path(&mut self, root_path: impl Into<PathBuf>) {
        self.root_path = Some(root_path.into());
    }

    #[must_use]
    pub fn version_range_indicators(&self) -> &[VersionRangeIndicator] {
        &self.version_range_indicators
    }

    /// Forces or lifts dry-run mode on every file to modify.
    pub fn perform_dry_run(&mut self, dry_run: bool) {
        for file in &mut self.files_to_modify {
            file.perform_dry_run(dry_run);
        }
    }

    /// Appends the files and indicators of another configuration.
    ///
    /// Release options, root path and presets of `self` are kept.
    pub fn merge(&mut self, other: Self) {
        self.files_to_modify.extend(other.files_to_modify);
        self.version_range_indicators
            .extend(other.version_range_indicators);
    }

    /// Resolves every referenced preset, left to right, and merges its
    /// configuration into this one.
    ///
    /// # Errors
    ///
    /// Returns an error if a preset does not exist, its options are invalid,
    /// or it fails to build its configuration.
    pub fn apply_presets(mut self) -> ConfigResult<Self> {
        let factory = PresetFactory::new();

        for entry in self.presets.clone() {
            let preset = factory.get(entry.name(), entry.options())?;
            let contributed = preset.config(&self)?;

            debug!(
                preset = preset.identifier(),
                files = contributed.files_to_modify.len(),
                indicators = contributed.version_range_indicators.len(),
                "applied preset"
            );

            self.merge(contributed);
        }

        Ok(self)
    }
}

impl TryFrom<RawConfig> for VersionBumperConfig {
    type Error = crate::ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let files_to_modify = raw
            .files_to_modify
            .into_iter()
            .map(file_from_raw)
            .collect::<ConfigResult<Vec<_>>>()?;

        let version_range_indicators = raw
            .version_range_indicators
            .into_iter()
            .map(indicator_from_raw)
            .collect::<ConfigResult<Vec<_>>>()?;

        let options = raw.release_options;
        let release_options = ReleaseOptions::new(
            options.commit_message,
            options.tag_name,
            options.overwrite_existing_tag,
            options.sign_tag,
        )?;

        Ok(Self {
            presets: raw.presets,
            files_to_modify,
            release_options,
            root_path: raw.root_path,
            version_range_indicators,
        })
    }
}

fn file_from_raw(raw: RawFileToModify) -> ConfigResult<FileToModify> {
    let patterns = raw
        .patterns
        .into_iter()
        .map(FilePattern::new)
        .collect::<ConfigResult<Vec<_>>>()?;

    Ok(FileToModify::new(raw.path, patterns)
        .with_report_unmatched(raw.report_unmatched)
        .with_report_missing(raw.report_missing))
}

fn indicator_from_raw(raw: RawVersionRangeIndicator) -> ConfigResult<VersionRangeIndicator> {
    let patterns = raw
        .patterns
        .into_iter()
        .map(|p| VersionRangePattern::new(p.indicator_type, p.pattern))
        .collect::<ConfigResult<Vec<_>>>()?;

    Ok(VersionRangeIndicator::new(raw.range, patterns, raw.strategy))
}
