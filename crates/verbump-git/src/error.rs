//! Git error types.

use std::path::PathBuf;

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(PathBuf),

    /// Repository has no working tree.
    #[error("repository has no working tree: {0}")]
    BareRepository(PathBuf),

    /// Tag not found.
    #[error("tag not found: {0}")]
    TagNotFound(String),

    /// Path cannot be staged because it lives outside the working tree.
    #[error("path is outside of the working tree: {0}")]
    PathOutsideWorkdir(PathBuf),

    /// External git command failed.
    #[error("command `{command}` failed: {stderr}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// Captured standard error.
        stderr: String,
    },

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;
