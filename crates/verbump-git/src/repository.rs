//! Git repository wrapper.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Delta, ErrorCode, Oid, Repository as Git2Repo};
use tracing::debug;

use crate::{ChangeType, DiffEntry, GitError, GitProvider, GitResult, Tag, TagOptions};

/// A Git repository bound to a release root path.
///
/// The root path may be the work tree itself or any directory inside it.
pub struct Repository {
    inner: Git2Repo,
    root: PathBuf,
}

impl Repository {
    /// Opens the repository containing the given root path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not inside a Git repository.
    pub fn open(root: impl AsRef<Path>) -> GitResult<Self> {
        let root = root.as_ref();
        let not_a_repo = || GitError::NotARepo(root.to_path_buf());

        let canonical = root.canonicalize().map_err(|_| not_a_repo())?;
        let inner = Git2Repo::discover(&canonical).map_err(|_| not_a_repo())?;

        debug!(root = %canonical.display(), "opened repository");

        Ok(Self {
            inner,
            root: canonical,
        })
    }

    /// Returns the root path the repository is bound to.
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Returns the work tree path.
    ///
    /// # Errors
    ///
    /// Returns an error for bare repositories.
    pub fn workdir(&self) -> GitResult<&Path> {
        self.inner
            .workdir()
            .ok_or_else(|| GitError::BareRepository(self.inner.path().to_path_buf()))
    }

    fn tag_oid(tag: &Tag) -> GitResult<Oid> {
        Oid::from_str(&tag.target).map_err(|_| GitError::TagNotFound(tag.name.clone()))
    }

    /// Resolves a staged path to its location relative to the work tree.
    fn workdir_relative(&self, path: &Path) -> GitResult<PathBuf> {
        let workdir = self.workdir()?.canonicalize()?;
        let full = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_path().join(path)
        };
        let full = full.canonicalize().unwrap_or(full);

        full.strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| GitError::PathOutsideWorkdir(full.clone()))
    }

    fn create_signed_tag(&self, name: &str, message: &str) -> GitResult<()> {
        let output = Command::new("git")
            .args(["tag", "-s", "-m", message, name])
            .current_dir(self.workdir()?)
            .output()?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git tag -s -m {message:?} {name}"),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl GitProvider for Repository {
    fn list_tags(&self) -> GitResult<Vec<String>> {
        let tags = self.inner.tag_names(None)?;
        Ok(tags.iter().flatten().map(String::from).collect())
    }

    fn resolve_tag(&self, name: &str) -> GitResult<Option<Tag>> {
        let reference = match self.inner.find_reference(&format!("refs/tags/{name}")) {
            Ok(reference) => reference,
            Err(err) if err.code() == ErrorCode::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let commit = reference.peel_to_commit()?;
        Ok(Some(Tag::new(name, commit.id().to_string())))
    }

    fn commit_messages_since(&self, tag: &Tag) -> GitResult<Vec<String>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.push_head()?;
        revwalk.hide(Self::tag_oid(tag)?)?;

        let mut messages = Vec::new();
        for oid in revwalk {
            let commit = self.inner.find_commit(oid?)?;
            if let Some(summary) = commit.summary() {
                messages.push(summary.to_string());
            }
        }

        debug!(tag = %tag.name, count = messages.len(), "collected commit messages");

        Ok(messages)
    }

    fn diff_since(&self, tag: &Tag) -> GitResult<Vec<DiffEntry>> {
        let old_tree = self.inner.find_commit(Self::tag_oid(tag)?)?.tree()?;
        let new_tree = self.inner.head()?.peel_to_commit()?.tree()?;

        let mut diff = self
            .inner
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?;
        diff.find_similar(None)?;

        let entries: Vec<DiffEntry> = diff
            .deltas()
            .filter_map(|delta| {
                let change = match delta.status() {
                    Delta::Added => ChangeType::Added,
                    Delta::Deleted => ChangeType::Deleted,
                    _ => ChangeType::Modified,
                };
                let path = delta.old_file().path().or_else(|| delta.new_file().path())?;

                Some(DiffEntry::new(path.to_string_lossy(), change))
            })
            .collect();

        debug!(tag = %tag.name, count = entries.len(), "collected diff entries");

        Ok(entries)
    }

    fn stage(&self, paths: &[PathBuf]) -> GitResult<()> {
        let mut index = self.inner.index()?;

        for path in paths {
            let relative = self.workdir_relative(path)?;
            debug!(path = %relative.display(), "staging file");
            index.add_path(&relative)?;
        }

        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> GitResult<String> {
        let sig = self.inner.signature()?;
        let tree_id = self.inner.index()?.write_tree()?;
        let tree = self.inner.find_tree(tree_id)?;

        let parent = self.inner.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        debug!(id = %oid, "created commit");

        Ok(oid.to_string())
    }

    fn create_tag(&self, name: &str, options: &TagOptions) -> GitResult<()> {
        if options.sign {
            self.create_signed_tag(name, &options.message)?;
        } else {
            let commit = self.inner.head()?.peel_to_commit()?;
            let sig = self.inner.signature()?;

            self.inner
                .tag(name, commit.as_object(), &sig, &options.message, false)?;
        }

        debug!(tag = name, signed = options.sign, "created tag");

        Ok(())
    }

    fn delete_tag(&self, name: &str) -> GitResult<()> {
        self.inner.tag_delete(name)?;
        debug!(tag = name, "deleted tag");
        Ok(())
    }

    fn last_commit_id(&self) -> GitResult<String> {
        let commit = self.inner.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }
}
