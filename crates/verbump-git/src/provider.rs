//! Git operations used by range detection and releases.

use std::fmt;
use std::path::PathBuf;

use crate::GitResult;

/// A tag resolved to the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Short tag name, e.g. `1.2.3`.
    pub name: String,
    /// Id of the commit the tag points at.
    pub target: String,
}

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }
}

/// Kind of change a path went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// The path was added.
    Added,
    /// The path was deleted.
    Deleted,
    /// The path was modified, renamed, copied or changed type.
    Modified,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => f.write_str("added"),
            Self::Deleted => f.write_str("deleted"),
            Self::Modified => f.write_str("modified"),
        }
    }
}

/// A single entry of a diff between two revisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    /// Original path of the entry, relative to the repository root.
    pub path: String,
    /// Kind of change.
    pub change: ChangeType,
}

impl DiffEntry {
    /// Creates a new diff entry.
    #[must_use]
    pub fn new(path: impl Into<String>, change: ChangeType) -> Self {
        Self {
            path: path.into(),
            change,
        }
    }
}

/// Options for tag creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
    /// Tag annotation message.
    pub message: String,
    /// Whether the tag is signed.
    pub sign: bool,
}

/// Git operations verbump relies on.
///
/// Implementations are bound to a single repository. Paths passed to
/// [`GitProvider::stage`] are relative to the root path the provider was
/// opened with, or absolute.
pub trait GitProvider {
    /// Returns the names of all tags.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be read.
    fn list_tags(&self) -> GitResult<Vec<String>>;

    /// Resolves a tag by name, returning `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag exists but cannot be read.
    fn resolve_tag(&self, name: &str) -> GitResult<Option<Tag>>;

    /// Returns the subject line of every commit between the tag and `HEAD`,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if history cannot be walked.
    fn commit_messages_since(&self, tag: &Tag) -> GitResult<Vec<String>>;

    /// Returns the file-level diff between the tag and `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed.
    fn diff_since(&self, tag: &Tag) -> GitResult<Vec<DiffEntry>>;

    /// Stages the given paths.
    ///
    /// # Errors
    ///
    /// Returns an error if a path cannot be added to the index.
    fn stage(&self, paths: &[PathBuf]) -> GitResult<()>;

    /// Commits the index and returns the new commit id.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn commit(&self, message: &str) -> GitResult<String>;

    /// Creates a tag pointing at `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be created.
    fn create_tag(&self, name: &str, options: &TagOptions) -> GitResult<()>;

    /// Deletes a tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be deleted.
    fn delete_tag(&self, name: &str) -> GitResult<()>;

    /// Returns the id of the commit `HEAD` points at.
    ///
    /// # Errors
    ///
    /// Returns an error if `HEAD` cannot be resolved.
    fn last_commit_id(&self) -> GitResult<String>;
}

impl<T: GitProvider + ?Sized> GitProvider for &T {
    fn list_tags(&self) -> GitResult<Vec<String>> {
        (**self).list_tags()
    }

    fn resolve_tag(&self, name: &str) -> GitResult<Option<Tag>> {
        (**self).resolve_tag(name)
    }

    fn commit_messages_since(&self, tag: &Tag) -> GitResult<Vec<String>> {
        (**self).commit_messages_since(tag)
    }

    fn diff_since(&self, tag: &Tag) -> GitResult<Vec<DiffEntry>> {
        (**self).diff_since(tag)
    }

    fn stage(&self, paths: &[PathBuf]) -> GitResult<()> {
        (**self).stage(paths)
    }

    fn commit(&self, message: &str) -> GitResult<String> {
        (**self).commit(message)
    }

    fn create_tag(&self, name: &str, options: &TagOptions) -> GitResult<()> {
        (**self).create_tag(name, options)
    }

    fn delete_tag(&self, name: &str) -> GitResult<()> {
        (**self).delete_tag(name)
    }

    fn last_commit_id(&self) -> GitResult<String> {
        (**self).last_commit_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_type_display() {
        assert_eq!(ChangeType::Added.to_string(), "added");
        assert_eq!(ChangeType::Deleted.to_string(), "deleted");
        assert_eq!(ChangeType::Modified.to_string(), "modified");
    }

    #[test]
    fn test_constructors() {
        let tag = Tag::new("1.0.0", "abc123");
        assert_eq!(tag.name, "1.0.0");
        assert_eq!(tag.target, "abc123");

        let entry = DiffEntry::new("src/lib.rs", ChangeType::Modified);
        assert_eq!(entry.path, "src/lib.rs");
        assert_eq!(entry.change, ChangeType::Modified);
    }
}
