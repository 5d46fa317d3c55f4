//! TYPO3 extension preset.

use serde::Deserialize;

use super::Preset;
use crate::{ConfigResult, FilePattern, FileToModify, VersionBumperConfig};

/// Whether `Documentation/guides.xml` is bumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Documentation {
    /// `true` bumps and requires the file, `false` skips it.
    Enabled(bool),
    /// `"auto"` bumps the file if it exists.
    Auto(AutoKeyword),
}

/// The `"auto"` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoKeyword {
    Auto,
}

impl Default for Documentation {
    fn default() -> Self {
        Self::Auto(AutoKeyword::Auto)
    }
}

/// Options of [`Typo3ExtensionPreset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Typo3ExtensionOptions {
    #[serde(default)]
    pub documentation: Documentation,
}

/// Bumps the version of a TYPO3 extension in `ext_emconf.php` and its
/// rendered documentation settings.
#[derive(Debug, Clone, Default)]
pub struct Typo3ExtensionPreset {
    options: Typo3ExtensionOptions,
}

impl Typo3ExtensionPreset {
    pub const IDENTIFIER: &'static str = "typo3-extension";

    #[must_use]
    pub fn new(options: Typo3ExtensionOptions) -> Self {
        Self { options }
    }
}

impl Preset for Typo3ExtensionPreset {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "TYPO3 extension, managed by ext_emconf.php"
    }

    fn config(&self, _root: &VersionBumperConfig) -> ConfigResult<VersionBumperConfig> {
        let mut config = VersionBumperConfig::new().with_file(
            FileToModify::new(
                "ext_emconf.php",
                vec![FilePattern::new("'version' => '{%version%}'")?],
            )
            .with_report_unmatched(true),
        );

        let required = match self.options.documentation {
            Documentation::Enabled(false) => return Ok(config),
            Documentation::Enabled(true) => true,
            Documentation::Auto(_) => false,
        };

        config = config.with_file(
            FileToModify::new(
                "Documentation/guides.xml",
                vec![FilePattern::new(r#"release="{%version%}""#)?],
            )
            .with_report_unmatched(true)
            .with_report_missing(required),
        );

        Ok(config)
    }
}
