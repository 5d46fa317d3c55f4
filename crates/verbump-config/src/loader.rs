//! Configuration loader.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::schema::RawConfig;
use crate::{ConfigError, ConfigResult, VersionBumperConfig};

/// Configuration file names, in detection order.
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    "version-bumper.json",
    "version-bumper.yaml",
    "version-bumper.yml",
    "version-bumper.toml",
];

/// Returns the first configuration file found in `dir`.
#[must_use]
pub fn detect_file(dir: impl AsRef<Path>) -> Option<PathBuf> {
    let dir = dir.as_ref();

    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Loads configuration from the given path and applies its presets.
///
/// The format is chosen by file extension. A missing root path is set to
/// the directory of the configuration file, a relative one is resolved
/// against it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, has an unknown
/// extension, or one of its presets fails.
pub fn read_from_file(path: impl AsRef<Path>) -> ConfigResult<VersionBumperConfig> {
    let path = std::path::absolute(path.as_ref())?;
    debug!(?path, "loading configuration");

    if !path.is_file() {
        return Err(ConfigError::NotFound(path));
    }

    let raw = parse(&path)?;
    let mut config = VersionBumperConfig::try_from(raw)?;

    let config_dir = path.parent().unwrap_or(Path::new("/"));
    let root_path = match config.root_path() {
        Some(root) if root.is_absolute() => root.to_path_buf(),
        Some(root) => config_dir.join(root),
        None => config_dir.to_path_buf(),
    };
    debug!(?root_path, "resolved root path");
    config.set_root_path(root_path);

    config.apply_presets()
}

fn parse(path: &Path) -> ConfigResult<RawConfig> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let content = || std::fs::read_to_string(path);

    let raw = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content()?)?,
        Some("yaml" | "yml") => serde_yaml::from_str(&content()?)?,
        Some("toml") => toml::from_str(&content()?)?,
        _ => return Err(ConfigError::Unsupported(path.to_path_buf())),
    };

    Ok(raw)
}
