//! Configuration file schema.
//!
//! These types mirror the file layout one to one. They are converted into
//! the validated types of this crate by [`crate::VersionBumperConfig`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use verbump_version::VersionRange;

use crate::release::{DEFAULT_COMMIT_MESSAGE, DEFAULT_TAG_NAME};
use crate::{IndicatorStrategy, IndicatorType};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawConfig {
    /// Editor hint pointing at a JSON schema, ignored.
    #[serde(default, rename = "$schema", skip_serializing)]
    pub schema: Option<String>,

    #[serde(default)]
    pub presets: Vec<PresetEntry>,

    #[serde(default)]
    pub files_to_modify: Vec<RawFileToModify>,

    #[serde(default)]
    pub release_options: RawReleaseOptions,

    #[serde(default)]
    pub root_path: Option<PathBuf>,

    #[serde(default)]
    pub version_range_indicators: Vec<RawVersionRangeIndicator>,
}

/// A preset reference, either a bare identifier or an identifier with
/// options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetEntry {
    /// Preset without options.
    Name(String),
    /// Preset with options.
    WithOptions {
        /// Preset identifier.
        name: String,
        /// Preset-specific options.
        #[serde(default)]
        options: serde_json::Value,
    },
}

impl PresetEntry {
    /// Returns the preset identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::WithOptions { name, .. } => name,
        }
    }

    /// Returns the preset options, `null` when none are given.
    #[must_use]
    pub fn options(&self) -> serde_json::Value {
        match self {
            Self::Name(_) => serde_json::Value::Null,
            Self::WithOptions { options, .. } => options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawFileToModify {
    pub path: PathBuf,

    #[serde(default)]
    pub patterns: Vec<String>,

    #[serde(default)]
    pub report_unmatched: bool,

    #[serde(default = "default_true")]
    pub report_missing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawReleaseOptions {
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_tag_name")]
    pub tag_name: String,

    #[serde(default)]
    pub overwrite_existing_tag: bool,

    #[serde(default)]
    pub sign_tag: bool,
}

impl Default for RawReleaseOptions {
    fn default() -> Self {
        Self {
            commit_message: default_commit_message(),
            tag_name: default_tag_name(),
            overwrite_existing_tag: false,
            sign_tag: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RawVersionRangeIndicator {
    pub range: VersionRange,

    #[serde(default)]
    pub patterns: Vec<RawVersionRangePattern>,

    #[serde(default)]
    pub strategy: IndicatorStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawVersionRangePattern {
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,

    pub pattern: String,
}

fn default_true() -> bool {
    true
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

fn default_tag_name() -> String {
    DEFAULT_TAG_NAME.to_string()
}
