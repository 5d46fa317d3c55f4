//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Configuration file has an unsupported extension.
    #[error("configuration file is not supported: {0}")]
    Unsupported(PathBuf),

    /// Invalid TOML syntax.
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// Invalid JSON syntax.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Invalid YAML syntax.
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// File pattern lacks the version placeholder.
    #[error("file pattern \"{0}\" is invalid: it must contain the {{%version%}} placeholder")]
    InvalidFilePattern(String),

    /// Tag name template lacks the version placeholder.
    #[error("tag name \"{0}\" is invalid: it must contain the {{%version%}} placeholder")]
    InvalidTagName(String),

    /// Indicator pattern is not a valid regular expression.
    #[error("regular expression \"{pattern}\" is invalid: {source}")]
    InvalidRegex {
        /// The pattern as written in the configuration.
        pattern: String,
        /// Underlying compile error.
        source: regex::Error,
    },

    /// Unknown preset identifier.
    #[error("preset \"{0}\" does not exist")]
    PresetNotFound(String),

    /// Preset options could not be resolved.
    #[error("options of preset \"{preset}\" are invalid: {message}")]
    PresetOptions {
        /// Preset identifier.
        preset: String,
        /// What went wrong.
        message: String,
    },

    /// A manifest file read by a preset is malformed.
    #[error("manifest file {path} is malformed: {message}")]
    ManifestMalformed {
        /// Path of the manifest.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The package name could not be resolved.
    #[error("package name is missing and cannot be read from {0}")]
    PackageNameMissing(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
