//! Pre-built configuration fragments for common project layouts.

mod composer_package;
mod conventional_commits;
mod npm_package;
mod typo3_commit_guidelines;
mod typo3_extension;

use serde::de::DeserializeOwned;
use verbump_version::VersionRange;

use crate::{
    ConfigError, ConfigResult, IndicatorStrategy, IndicatorType, VersionBumperConfig,
    VersionRangeIndicator, VersionRangePattern,
};

pub use composer_package::{ComposerPackageOptions, ComposerPackagePreset};
pub use conventional_commits::ConventionalCommitsPreset;
pub use npm_package::{NpmPackageOptions, NpmPackagePreset};
pub use typo3_commit_guidelines::Typo3CommitGuidelinesPreset;
pub use typo3_extension::{AutoKeyword, Documentation, Typo3ExtensionOptions, Typo3ExtensionPreset};

/// A configuration fragment merged into the root configuration.
pub trait Preset {
    /// Returns the identifier used to reference the preset.
    fn identifier(&self) -> &'static str;

    /// Returns a short description of the preset.
    fn description(&self) -> &'static str;

    /// Builds the configuration contributed by this preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset needs project data that cannot be read.
    fn config(&self, root: &VersionBumperConfig) -> ConfigResult<VersionBumperConfig>;
}

/// Resolves presets by identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresetFactory;

impl PresetFactory {
    /// Creates a new factory.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates the preset with the given identifier.
    ///
    /// `options` is `null` when the preset is referenced without options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PresetNotFound`] for unknown identifiers and
    /// [`ConfigError::PresetOptions`] if the options do not fit the preset.
    pub fn get(&self, name: &str, options: serde_json::Value) -> ConfigResult<Box<dyn Preset>> {
        let preset: Box<dyn Preset> = match name {
            ComposerPackagePreset::IDENTIFIER => Box::new(ComposerPackagePreset::new(
                resolve_options(name, options)?,
            )),
            ConventionalCommitsPreset::IDENTIFIER => Box::new(ConventionalCommitsPreset),
            NpmPackagePreset::IDENTIFIER => {
                Box::new(NpmPackagePreset::new(resolve_options(name, options)?))
            }
            Typo3CommitGuidelinesPreset::IDENTIFIER => Box::new(Typo3CommitGuidelinesPreset),
            Typo3ExtensionPreset::IDENTIFIER => Box::new(Typo3ExtensionPreset::new(
                resolve_options(name, options)?,
            )),
            _ => return Err(ConfigError::PresetNotFound(name.to_string())),
        };

        Ok(preset)
    }

    /// Returns every preset with default options.
    #[must_use]
    pub fn all(&self) -> Vec<Box<dyn Preset>> {
        vec![
            Box::new(ComposerPackagePreset::default()),
            Box::new(ConventionalCommitsPreset),
            Box::new(NpmPackagePreset::default()),
            Box::new(Typo3ExtensionPreset::default()),
            Box::new(Typo3CommitGuidelinesPreset),
        ]
    }
}

fn resolve_options<T: DeserializeOwned + Default>(
    preset: &str,
    options: serde_json::Value,
) -> ConfigResult<T> {
    if options.is_null() {
        return Ok(T::default());
    }

    serde_json::from_value(options).map_err(|err| ConfigError::PresetOptions {
        preset: preset.to_string(),
        message: err.to_string(),
    })
}

/// Builds an indicator matching a single commit message pattern.
fn commit_message_indicator(
    range: VersionRange,
    pattern: &str,
) -> ConfigResult<VersionRangeIndicator> {
    Ok(VersionRangeIndicator::new(
        range,
        vec![VersionRangePattern::new(IndicatorType::CommitMessage, pattern)?],
        IndicatorStrategy::MatchAny,
    ))
}

/// Joins a preset `path` option and a file name, relative to the root path.
fn resolve_path(path: &str, filename: &str) -> String {
    let path = path.trim_matches('/');
    if path.is_empty() {
        filename.to_string()
    } else {
        format!("{path}/{filename}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_known_presets() {
        let factory = PresetFactory::new();

        for preset in factory.all() {
            let resolved = factory
                .get(preset.identifier(), serde_json::Value::Null)
                .unwrap();
            assert_eq!(resolved.identifier(), preset.identifier());
            assert!(!resolved.description().is_empty());
        }
    }

    #[test]
    fn test_all_identifiers() {
        let identifiers: Vec<_> = PresetFactory::new()
            .all()
            .iter()
            .map(|p| p.identifier())
            .collect();
        assert_eq!(
            identifiers,
            vec![
                "composer-package",
                "conventional-commits",
                "npm-package",
                "typo3-extension",
                "typo3-commit-guidelines"
            ]
        );
    }

    #[test]
    fn test_get_unknown_preset() {
        let result = PresetFactory::new().get("foo", serde_json::Value::Null);
        assert!(matches!(result, Err(ConfigError::PresetNotFound(name)) if name == "foo"));
    }

    #[test]
    fn test_get_invalid_options() {
        let result = PresetFactory::new().get("composer-package", json!({"unknown": true}));
        assert!(matches!(
            result,
            Err(ConfigError::PresetOptions { preset, .. }) if preset == "composer-package"
        ));

        let result = PresetFactory::new().get("composer-package", json!({"path": 42}));
        assert!(matches!(result, Err(ConfigError::PresetOptions { .. })));
    }

    #[test]
    fn test_commit_presets_ignore_options() {
        let factory = PresetFactory::new();
        assert!(factory.get("conventional-commits", json!({"foo": 1})).is_ok());
        assert!(factory.get("typo3-commit-guidelines", json!({"foo": 1})).is_ok());
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(resolve_path("", "composer.json"), "composer.json");
        assert_eq!(resolve_path("lib", "composer.json"), "lib/composer.json");
        assert_eq!(resolve_path("/lib/", "composer.json"), "lib/composer.json");
    }
}
