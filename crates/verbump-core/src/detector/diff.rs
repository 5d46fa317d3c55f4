//! Changed path matching.

use verbump_config::{IndicatorType, VersionRangePattern};
use verbump_git::{ChangeType, DiffEntry};

use super::RangeDetection;

/// Matches file patterns against the paths of a diff.
pub(crate) struct Diff {
    entries: Vec<DiffEntry>,
}

impl Diff {
    pub(crate) fn new(entries: Vec<DiffEntry>) -> Self {
        Self { entries }
    }

    fn entries_of(&self, indicator_type: IndicatorType) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(move |entry| indicator_type_of(entry.change) == indicator_type)
    }
}

fn indicator_type_of(change: ChangeType) -> IndicatorType {
    match change {
        ChangeType::Added => IndicatorType::FileAdded,
        ChangeType::Deleted => IndicatorType::FileDeleted,
        ChangeType::Modified => IndicatorType::FileModified,
    }
}

impl RangeDetection for Diff {
    fn supports(&self, pattern: &VersionRangePattern) -> bool {
        self.entries_of(pattern.indicator_type()).next().is_some()
    }

    fn matches(&self, pattern: &VersionRangePattern) -> bool {
        self.entries_of(pattern.indicator_type())
            .any(|entry| pattern.is_match(&entry.path))
    }
}
