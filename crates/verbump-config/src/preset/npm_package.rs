//! NPM package preset.

use std::path::Path;

use serde::Deserialize;

use super::{Preset, resolve_path};
use crate::{ConfigError, ConfigResult, FilePattern, FileToModify, VersionBumperConfig};

/// Options of [`NpmPackagePreset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NpmPackageOptions {
    /// Package name, read from `package.json` when omitted.
    #[serde(default)]
    pub package_name: Option<String>,

    /// Directory of `package.json`, relative to the root path.
    #[serde(default)]
    pub path: String,
}

/// Bumps the version of an NPM package in `package.json` and
/// `package-lock.json`.
#[derive(Debug, Clone, Default)]
pub struct NpmPackagePreset {
    options: NpmPackageOptions,
}

impl NpmPackagePreset {
    pub const IDENTIFIER: &'static str = "npm-package";

    #[must_use]
    pub fn new(options: NpmPackageOptions) -> Self {
        Self { options }
    }

    fn package_name(&self, package_json: &FileToModify, root: &VersionBumperConfig) -> ConfigResult<String> {
        if let Some(name) = &self.options.package_name {
            return Ok(name.clone());
        }

        let Some(root_path) = root.root_path() else {
            return Err(ConfigError::PackageNameMissing(package_json.path().to_path_buf()));
        };

        read_package_name(&package_json.full_path(root_path))
    }
}

impl Preset for NpmPackagePreset {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn description(&self) -> &'static str {
        "NPM package, managed by package.json and package-lock.json"
    }

    fn config(&self, root: &VersionBumperConfig) -> ConfigResult<VersionBumperConfig> {
        let package_json = FileToModify::new(
            resolve_path(&self.options.path, "package.json"),
            vec![FilePattern::new(r#""version": "{%version%}""#)?],
        )
        .with_report_unmatched(true);

        let name = self.package_name(&package_json, root)?;

        // Lockfiles carry the package version at the top level and, since
        // lockfile v2, again in the `packages[""]` entry.
        let package_lock = FileToModify::new(
            resolve_path(&self.options.path, "package-lock.json"),
            vec![FilePattern::new(format!(
                "\"name\": \"{name}\",\n\"version\": \"{{%version%}}\""
            ))?],
        )
        .with_report_unmatched(true);

        Ok(VersionBumperConfig::new()
            .with_file(package_json)
            .with_file(package_lock))
    }
}

fn read_package_name(path: &Path) -> ConfigResult<String> {
    if !path.exists() {
        return Err(ConfigError::PackageNameMissing(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    let malformed = |message: String| ConfigError::ManifestMalformed {
        path: path.to_path_buf(),
        message,
    };

    let manifest: serde_json::Value =
        serde_json::from_str(&contents).map_err(|err| malformed(err.to_string()))?;

    manifest
        .get("name")
        .and_then(serde_json::Value::as_str)
        .map(String::from)
        .ok_or_else(|| malformed("\"name\" is missing or not a string".to_string()))
}
