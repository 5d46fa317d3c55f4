//! Commit message matching.

use verbump_config::{IndicatorType, VersionRangePattern};

use super::RangeDetection;

/// Matches commit message patterns against commit subjects.
pub(crate) struct CommitMessages {
    messages: Vec<String>,
}

impl CommitMessages {
    pub(crate) fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

impl RangeDetection for CommitMessages {
    fn supports(&self, pattern: &VersionRangePattern) -> bool {
        pattern.indicator_type() == IndicatorType::CommitMessage && !self.messages.is_empty()
    }

    fn matches(&self, pattern: &VersionRangePattern) -> bool {
        self.messages.iter().any(|message| pattern.is_match(message))
    }
}
