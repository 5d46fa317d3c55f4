//! Scripted provider for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::{DiffEntry, GitError, GitProvider, GitResult, Tag, TagOptions};

/// Operations a [`MockRepository`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    ListTags,
    ResolveTag,
    CommitMessages,
    Diff,
    Stage,
    Commit,
    CreateTag,
    DeleteTag,
    LastCommitId,
}

/// A mutating call recorded by a [`MockRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Stage(Vec<PathBuf>),
    Commit(String),
    CreateTag { name: String, options: TagOptions },
    DeleteTag(String),
}

/// Mock repository for testing without actual git operations.
///
/// Tags, commit messages and diff entries are scripted up front. Mutating
/// calls are recorded and update the scripted tag list.
#[derive(Default)]
pub struct MockRepository {
    tags: RefCell<Vec<Tag>>,
    commit_messages: Vec<String>,
    diff: Vec<DiffEntry>,
    failures: HashSet<MockOperation>,
    calls: RefCell<Vec<MockCall>>,
    commits: Cell<usize>,
}

impl MockRepository {
    /// Creates an empty mock repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let target = format!("{:040x}", self.tags.borrow().len() + 1);
        self.tags.borrow_mut().push(Tag::new(name, target));
        self
    }

    /// Adds a commit message returned for any tag, newest first.
    #[must_use]
    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_messages.push(message.into());
        self
    }

    /// Adds a diff entry returned for any tag.
    #[must_use]
    pub fn with_diff_entry(mut self, entry: DiffEntry) -> Self {
        self.diff.push(entry);
        self
    }

    /// Makes the given operation fail.
    #[must_use]
    pub fn failing_on(mut self, operation: MockOperation) -> Self {
        self.failures.insert(operation);
        self
    }

    /// Returns every mutating call in the order it happened.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    fn check(&self, operation: MockOperation) -> GitResult<()> {
        if self.failures.contains(&operation) {
            return Err(GitError::Git2(git2::Error::from_str(&format!(
                "{operation:?} failed"
            ))));
        }
        Ok(())
    }

    fn record(&self, call: MockCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl GitProvider for MockRepository {
    fn list_tags(&self) -> GitResult<Vec<String>> {
        self.check(MockOperation::ListTags)?;
        Ok(self.tags.borrow().iter().map(|t| t.name.clone()).collect())
    }

    fn resolve_tag(&self, name: &str) -> GitResult<Option<Tag>> {
        self.check(MockOperation::ResolveTag)?;
        Ok(self.tags.borrow().iter().find(|t| t.name == name).cloned())
    }

    fn commit_messages_since(&self, _tag: &Tag) -> GitResult<Vec<String>> {
        self.check(MockOperation::CommitMessages)?;
        Ok(self.commit_messages.clone())
    }

    fn diff_since(&self, _tag: &Tag) -> GitResult<Vec<DiffEntry>> {
        self.check(MockOperation::Diff)?;
        Ok(self.diff.clone())
    }

    fn stage(&self, paths: &[PathBuf]) -> GitResult<()> {
        self.check(MockOperation::Stage)?;
        self.record(MockCall::Stage(paths.to_vec()));
        Ok(())
    }

    fn commit(&self, message: &str) -> GitResult<String> {
        self.check(MockOperation::Commit)?;
        self.record(MockCall::Commit(message.to_string()));
        self.commits.set(self.commits.get() + 1);
        self.last_commit_id()
    }

    fn create_tag(&self, name: &str, options: &TagOptions) -> GitResult<()> {
        self.check(MockOperation::CreateTag)?;
        if self.tags.borrow().iter().any(|t| t.name == name) {
            return Err(GitError::Git2(git2::Error::from_str(&format!(
                "tag '{name}' already exists"
            ))));
        }

        self.record(MockCall::CreateTag {
            name: name.to_string(),
            options: options.clone(),
        });
        let target = self.last_commit_id()?;
        self.tags.borrow_mut().push(Tag::new(name, target));
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> GitResult<()> {
        self.check(MockOperation::DeleteTag)?;
        let mut tags = self.tags.borrow_mut();
        let Some(position) = tags.iter().position(|t| t.name == name) else {
            return Err(GitError::TagNotFound(name.to_string()));
        };
        tags.remove(position);
        drop(tags);

        self.record(MockCall::DeleteTag(name.to_string()));
        Ok(())
    }

    fn last_commit_id(&self) -> GitResult<String> {
        self.check(MockOperation::LastCommitId)?;
        Ok(format!("{:040x}", 0xc0ffee_usize + self.commits.get()))
    }
}
