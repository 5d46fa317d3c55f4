//! Files whose versions are bumped.

use std::path::{Path, PathBuf};

use crate::FilePattern;

/// A file together with the patterns locating its version strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToModify {
    path: PathBuf,
    patterns: Vec<FilePattern>,
    report_unmatched: bool,
    report_missing: bool,
    dry_run: bool,
}

impl FileToModify {
    /// Creates a new file to modify.
    ///
    /// Unmatched patterns are not reported, a missing file is.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, patterns: Vec<FilePattern>) -> Self {
        Self {
            path: path.into(),
            patterns,
            report_unmatched: false,
            report_missing: true,
            dry_run: false,
        }
    }

    /// Sets whether patterns without a match are reported.
    #[must_use]
    pub fn with_report_unmatched(mut self, report_unmatched: bool) -> Self {
        self.report_unmatched = report_unmatched;
        self
    }

    /// Sets whether a missing file is an error.
    #[must_use]
    pub fn with_report_missing(mut self, report_missing: bool) -> Self {
        self.report_missing = report_missing;
        self
    }

    /// Returns the path as configured.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path resolved against the root path.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn full_path(&self, root_path: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            root_path.join(&self.path)
        }
    }

    /// Returns the patterns in declaration order.
    #[must_use]
    pub fn patterns(&self) -> &[FilePattern] {
        &self.patterns
    }

    #[must_use]
    pub fn report_unmatched(&self) -> bool {
        self.report_unmatched
    }

    #[must_use]
    pub fn report_missing(&self) -> bool {
        self.report_missing
    }

    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Forces or lifts dry-run mode for this file.
    pub fn perform_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }
}
