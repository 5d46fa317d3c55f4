//! Results of bump and release runs.

use std::fmt;

use verbump_config::{FilePattern, FileToModify};
use verbump_version::Version;

/// Outcome of a single write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationState {
    /// The version was replaced.
    Modified,
    /// The version already had its target value.
    Skipped,
    /// The pattern did not match.
    Unmatched,
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modified => f.write_str("modified"),
            Self::Skipped => f.write_str("skipped"),
            Self::Unmatched => f.write_str("unmatched"),
        }
    }
}

/// One pattern applied at one match in one file.
///
/// Modified and skipped operations always carry a source version, a target
/// version, the file contents after the substitution and the byte offset of
/// the match in the original contents. Unmatched operations carry none of
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOperation {
    pattern: FilePattern,
    state: OperationState,
    bump: Option<Bump>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bump {
    source: Version,
    target: Version,
    result: Vec<u8>,
    offset: usize,
}

impl WriteOperation {
    /// Creates an operation that replaced `source` with `target`.
    #[must_use]
    pub fn modified(
        pattern: FilePattern,
        source: Version,
        target: Version,
        result: impl Into<Vec<u8>>,
        offset: usize,
    ) -> Self {
        Self::matched(
            OperationState::Modified,
            pattern,
            source,
            target,
            result.into(),
            offset,
        )
    }

    /// Creates an operation whose replacement left the contents unchanged.
    #[must_use]
    pub fn skipped(
        pattern: FilePattern,
        source: Version,
        target: Version,
        result: impl Into<Vec<u8>>,
        offset: usize,
    ) -> Self {
        Self::matched(
            OperationState::Skipped,
            pattern,
            source,
            target,
            result.into(),
            offset,
        )
    }

    /// Creates an operation for a pattern without any match.
    #[must_use]
    pub fn unmatched(pattern: FilePattern) -> Self {
        Self {
            pattern,
            state: OperationState::Unmatched,
            bump: None,
        }
    }

    fn matched(
        state: OperationState,
        pattern: FilePattern,
        source: Version,
        target: Version,
        result: Vec<u8>,
        offset: usize,
    ) -> Self {
        Self {
            pattern,
            state,
            bump: Some(Bump {
                source,
                target,
                result,
                offset,
            }),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &FilePattern {
        &self.pattern
    }

    #[must_use]
    pub fn state(&self) -> OperationState {
        self.state
    }

    #[must_use]
    pub fn source(&self) -> Option<&Version> {
        self.bump.as_ref().map(|b| &b.source)
    }

    #[must_use]
    pub fn target(&self) -> Option<&Version> {
        self.bump.as_ref().map(|b| &b.target)
    }

    /// Returns the file contents after this operation.
    #[must_use]
    pub fn result(&self) -> Option<&[u8]> {
        self.bump.as_ref().map(|b| b.result.as_slice())
    }

    /// Returns the byte offset of the match in the original file contents.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.bump.as_ref().map(|b| b.offset)
    }
}

/// A file together with the operations applied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBumpResult {
    file: FileToModify,
    operations: Vec<WriteOperation>,
}

impl VersionBumpResult {
    #[must_use]
    pub fn new(file: FileToModify, operations: Vec<WriteOperation>) -> Self {
        Self { file, operations }
    }

    #[must_use]
    pub fn file(&self) -> &FileToModify {
        &self.file
    }

    /// Returns the operations in the order they were applied.
    #[must_use]
    pub fn operations(&self) -> &[WriteOperation] {
        &self.operations
    }

    /// Returns true if at least one operation modified the file.
    #[must_use]
    pub fn has_modifications(&self) -> bool {
        self.operations
            .iter()
            .any(|op| op.state() == OperationState::Modified)
    }

    /// Groups operations sharing source, target and state.
    ///
    /// Groups keep the order in which their first operation appeared.
    #[must_use]
    pub fn grouped_operations(&self) -> Vec<Vec<&WriteOperation>> {
        let mut groups: Vec<Vec<&WriteOperation>> = Vec::new();

        for operation in &self.operations {
            let group = groups.iter_mut().find(|group| {
                let first = group[0];
                first.source() == operation.source()
                    && first.target() == operation.target()
                    && first.state() == operation.state()
            });

            match group {
                Some(group) => group.push(operation),
                None => groups.push(vec![operation]),
            }
        }

        groups
    }
}

/// Outcome of a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionReleaseResult {
    committed_files: Vec<FileToModify>,
    commit_message: String,
    tag_name: String,
    commit_id: Option<String>,
}

impl VersionReleaseResult {
    #[must_use]
    pub fn new(
        committed_files: Vec<FileToModify>,
        commit_message: String,
        tag_name: String,
        commit_id: Option<String>,
    ) -> Self {
        Self {
            committed_files,
            commit_message,
            tag_name,
            commit_id,
        }
    }

    /// Returns the files included in the release commit.
    #[must_use]
    pub fn committed_files(&self) -> &[FileToModify] {
        &self.committed_files
    }

    #[must_use]
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Returns the release commit id, `None` for dry runs.
    #[must_use]
    pub fn commit_id(&self) -> Option<&str> {
        self.commit_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> FilePattern {
        FilePattern::new("version: {%version%}").unwrap()
    }

    fn modified(source: Version, target: Version) -> WriteOperation {
        WriteOperation::modified(pattern(), source, target, String::new(), 0)
    }

    #[test]
    fn test_unmatched_has_no_bump() {
        let operation = WriteOperation::unmatched(pattern());
        assert_eq!(operation.state(), OperationState::Unmatched);
        assert_eq!(operation.source(), None);
        assert_eq!(operation.target(), None);
        assert_eq!(operation.result(), None);
        assert_eq!(operation.offset(), None);
    }

    #[test]
    fn test_skipped() {
        let operation = WriteOperation::skipped(
            pattern(),
            Version::new(1, 0, 0),
            Version::new(1, 0, 0),
            "version: 1.0.0".to_string(),
            9,
        );
        assert_eq!(operation.state(), OperationState::Skipped);
        assert_eq!(operation.result(), Some("version: 1.0.0".as_bytes()));
        assert_eq!(operation.offset(), Some(9));
    }

    #[test]
    fn test_grouped_operations() {
        let file = FileToModify::new("foo", vec![pattern()]);
        let result = VersionBumpResult::new(
            file,
            vec![
                modified(Version::new(1, 0, 0), Version::new(1, 1, 0)),
                WriteOperation::unmatched(pattern()),
                modified(Version::new(1, 0, 0), Version::new(1, 1, 0)),
                modified(Version::new(0, 9, 0), Version::new(0, 10, 0)),
                WriteOperation::unmatched(pattern()),
            ],
        );

        let sizes: Vec<_> = result.grouped_operations().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let states: Vec<_> = result
            .grouped_operations()
            .iter()
            .map(|group| group[0].state())
            .collect();
        assert_eq!(
            states,
            vec![
                OperationState::Modified,
                OperationState::Unmatched,
                OperationState::Modified
            ]
        );
    }

    #[test]
    fn test_has_modifications() {
        let file = FileToModify::new("foo", vec![pattern()]);
        let unmatched = VersionBumpResult::new(file.clone(), vec![WriteOperation::unmatched(pattern())]);
        assert!(!unmatched.has_modifications());

        let bumped = VersionBumpResult::new(
            file,
            vec![modified(Version::new(1, 0, 0), Version::new(2, 0, 0))],
        );
        assert!(bumped.has_modifications());
    }

    #[test]
    fn test_release_result() {
        let result = VersionReleaseResult::new(
            vec![],
            "Release 1.0.0".to_string(),
            "v1.0.0".to_string(),
            None,
        );
        assert_eq!(result.commit_message(), "Release 1.0.0");
        assert_eq!(result.tag_name(), "v1.0.0");
        assert_eq!(result.commit_id(), None);
    }
}
