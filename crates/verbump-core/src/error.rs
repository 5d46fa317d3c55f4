//! Core error types.

use std::path::PathBuf;

use thiserror::Error;
use verbump_git::GitError;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A file to modify does not exist.
    #[error("file {0} does not exist")]
    FileNotFound(PathBuf),

    /// A file to modify cannot be read.
    #[error("file {path} is not readable: {source}")]
    FileNotReadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A modified file cannot be written back.
    #[error("file {path} could not be modified: {source}")]
    FileWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The requested comparison tag does not exist.
    #[error("git tag \"{0}\" does not exist")]
    GitTagNotFound(String),

    /// The repository has no version tags.
    #[error("no version tags found in repository")]
    NoVersionTagsFound,

    /// The requested comparison tag cannot be read.
    #[error("cannot fetch git tag \"{name}\": {source}")]
    CannotFetchTag { name: String, source: GitError },

    /// Tags cannot be listed.
    #[error("cannot fetch latest git tag: {0}")]
    CannotFetchLatestTag(#[source] GitError),

    /// Commits since the comparison tag cannot be read.
    #[error("cannot fetch git commits in range {range}: {source}")]
    CannotFetchCommits { range: String, source: GitError },

    /// The diff since the comparison tag cannot be computed.
    #[error("cannot fetch git diff in range {range}: {source}")]
    CannotFetchDiff { range: String, source: GitError },

    /// Bump results point at more than one target version.
    #[error("ambiguous target versions detected: {}", .0.join(", "))]
    AmbiguousVersionsDetected(Vec<String>),

    /// Bump results carry no target version.
    #[error("target version is missing")]
    TargetVersionIsMissing,

    /// No file was modified by the bump.
    #[error("no modified files found")]
    NoModifiedFilesFound,

    /// The release tag exists and may not be overwritten.
    #[error("tag \"{0}\" already exists")]
    TagAlreadyExists(String),

    /// The release tag could not be created.
    #[error("cannot create tag \"{name}\": {source}")]
    TagCreationFailed { name: String, source: GitError },

    /// Version error.
    #[error("version error: {0}")]
    Version(#[from] verbump_version::VersionError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] verbump_config::ConfigError),

    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] GitError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
