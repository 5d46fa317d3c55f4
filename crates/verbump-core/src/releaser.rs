//! Release commit and tag creation.

use std::path::PathBuf;

use tracing::{debug, info};
use verbump_config::{FileToModify, ReleaseOptions};
use verbump_git::{GitProvider, TagOptions};
use verbump_version::{Version, replace_version_in_pattern};

use crate::{CoreError, CoreResult, VersionBumpResult, VersionReleaseResult};

/// Commits bumped files and tags the release.
pub struct VersionReleaser<G> {
    git: G,
}

impl<G: GitProvider> VersionReleaser<G> {
    /// Creates a releaser writing to the given provider.
    pub fn new(git: G) -> Self {
        Self { git }
    }

    /// Commits every modified file and tags the commit.
    ///
    /// In dry-run mode the repository is left untouched and no commit id is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the results point at different versions or at
    /// none, no file was modified, the tag exists and may not be
    /// overwritten, or a git operation fails.
    pub fn release(
        &self,
        results: &[VersionBumpResult],
        options: &ReleaseOptions,
        dry_run: bool,
    ) -> CoreResult<VersionReleaseResult> {
        let version = extract_version(results)?.ok_or(CoreError::TargetVersionIsMissing)?;

        let modified_files = extract_modified_files(results);
        if modified_files.is_empty() {
            return Err(CoreError::NoModifiedFilesFound);
        }

        let commit_message = replace_version_in_pattern(options.commit_message(), &version);
        let tag_name = replace_version_in_pattern(options.tag_name(), &version);

        if self.git.list_tags()?.contains(&tag_name) {
            if !options.overwrite_existing_tag() {
                return Err(CoreError::TagAlreadyExists(tag_name));
            }

            if dry_run {
                debug!(tag = %tag_name, "would delete existing tag");
            } else {
                self.git.delete_tag(&tag_name)?;
                info!(tag = %tag_name, "deleted existing tag");
            }
        }

        let mut commit_id = None;

        if !dry_run {
            let paths: Vec<PathBuf> = modified_files
                .iter()
                .map(|file| file.path().to_path_buf())
                .collect();
            self.git.stage(&paths)?;
            self.git.commit(&commit_message)?;

            let tag_options = TagOptions {
                message: tag_name.clone(),
                sign: options.sign_tag(),
            };
            self.git
                .create_tag(&tag_name, &tag_options)
                .map_err(|source| CoreError::TagCreationFailed {
                    name: tag_name.clone(),
                    source,
                })?;

            let id = self.git.last_commit_id()?;
            info!(tag = %tag_name, commit = %id, "released version");
            commit_id = Some(id);
        }

        Ok(VersionReleaseResult::new(
            modified_files,
            commit_message,
            tag_name,
            commit_id,
        ))
    }
}

/// Returns the single target version shared by all operations.
fn extract_version(results: &[VersionBumpResult]) -> CoreResult<Option<Version>> {
    let mut targets: Vec<&Version> = Vec::new();

    for target in results
        .iter()
        .flat_map(VersionBumpResult::operations)
        .filter_map(|operation| operation.target())
    {
        if !targets.contains(&target) {
            targets.push(target);
        }
    }

    match targets.as_slice() {
        [] => Ok(None),
        [version] => Ok(Some((*version).clone())),
        _ => Err(CoreError::AmbiguousVersionsDetected(
            targets.iter().map(|v| v.full()).collect(),
        )),
    }
}

/// Returns each file with at least one modified operation, once, in order.
fn extract_modified_files(results: &[VersionBumpResult]) -> Vec<FileToModify> {
    let mut files: Vec<FileToModify> = Vec::new();

    for result in results {
        if result.has_modifications() && !files.contains(result.file()) {
            files.push(result.file().clone());
        }
    }

    files
}
