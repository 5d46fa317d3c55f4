//! Composer package preset.

use serde::Deserialize;

use super::{Preset, resolve_path};
use crate::{ConfigResult, FilePattern, FileToModify, VersionBumperConfig};

/// Options of [`ComposerPackagePreset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposerPackageOptions {
    /// Directory of `composer.json`, relative to the root path.
    #[serde(default)]
    pub path: String,
}

/// Bumps the version of a Composer package in `composer.json`.
#[derive(Debug, Clone, Default)]
pub struct ComposerPackagePreset {
    options: ComposerPackageOptions,
}

impl ComposerPackagePreset {
    pub const IDENTIFIER: &'static str = "composer-package";

    #[must_use]
    pub fn new(options: ComposerPackageOptions) -> Self {
        Self { options }
    }
}

impl Preset for ComposerPackagePreset {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "Composer package, managed by composer.json"
    }

    fn config(&self, _root: &VersionBumperConfig) -> ConfigResult<VersionBumperConfig> {
        let composer_json = FileToModify::new(
            resolve_path(&self.options.path, "composer.json"),
            vec![FilePattern::new(r#""version": "{%version%}""#)?],
        )
        .with_report_unmatched(true);

        Ok(VersionBumperConfig::new().with_file(composer_json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_config() {
        let config = ComposerPackagePreset::default()
            .config(&VersionBumperConfig::new())
            .unwrap();

        let file = &config.files_to_modify()[0];
        assert_eq!(config.files_to_modify().len(), 1);
        assert_eq!(file.path(), Path::new("composer.json"));
        assert_eq!(file.patterns()[0].original(), r#""version": "{%version%}""#);
        assert!(file.report_unmatched());
        assert!(file.report_missing());
        assert!(config.version_range_indicators().is_empty());
    }

    #[test]
    fn test_config_with_path() {
        let preset = ComposerPackagePreset::new(ComposerPackageOptions {
            path: "packages/api".to_string(),
        });
        let config = preset.config(&VersionBumperConfig::new()).unwrap();

        assert_eq!(
            config.files_to_modify()[0].path(),
            Path::new("packages/api/composer.json")
        );
    }
}
