//! Version range detection from git history.

mod commit_messages;
mod diff;

use tracing::debug;
use verbump_config::{VersionRangeIndicator, VersionRangePattern};
use verbump_git::{GitProvider, Tag};
use verbump_version::{Version, VersionRange};

use crate::{CoreError, CoreResult};
use commit_messages::CommitMessages;
use diff::Diff;

/// Evaluates version range patterns against one kind of git data.
pub(crate) trait RangeDetection {
    /// Returns true if the pattern targets data this detection holds.
    fn supports(&self, pattern: &VersionRangePattern) -> bool;

    /// Returns true if any item of the supported data matches.
    fn matches(&self, pattern: &VersionRangePattern) -> bool;
}

/// Detects the version range to bump from changes since the last release.
pub struct VersionRangeDetector<G> {
    git: G,
}

impl<G: GitProvider> VersionRangeDetector<G> {
    /// Creates a detector reading history from the given provider.
    pub fn new(git: G) -> Self {
        Self { git }
    }

    /// Returns the highest range whose indicator holds, or `None` if no
    /// indicator holds.
    ///
    /// Changes are compared against `since` when given, otherwise against
    /// the highest version tag of the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the comparison tag does not exist, the repository
    /// has no version tags, or history cannot be read.
    pub fn detect(
        &self,
        indicators: &[VersionRangeIndicator],
        since: Option<&str>,
    ) -> CoreResult<Option<VersionRange>> {
        let tag = match since {
            Some(name) => self
                .fetch_tag(name)?
                .ok_or_else(|| CoreError::GitTagNotFound(name.to_string()))?,
            None => self
                .fetch_latest_version_tag()?
                .ok_or(CoreError::NoVersionTagsFound)?,
        };
        debug!(tag = %tag.name, "comparing against tag");

        let range = format!("{}..HEAD", tag.name);
        let messages = self
            .git
            .commit_messages_since(&tag)
            .map_err(|source| CoreError::CannotFetchCommits {
                range: range.clone(),
                source,
            })?;
        let entries = self
            .git
            .diff_since(&tag)
            .map_err(|source| CoreError::CannotFetchDiff { range, source })?;
        debug!(
            commits = messages.len(),
            changes = entries.len(),
            "fetched history"
        );

        let commit_messages = CommitMessages::new(messages);
        let diff = Diff::new(entries);
        let detections: [&dyn RangeDetection; 2] = [&commit_messages, &diff];

        let detected = indicators
            .iter()
            .filter(|indicator| evaluate(indicator, &detections))
            .map(VersionRangeIndicator::range);

        Ok(VersionRange::highest(detected))
    }

    fn fetch_tag(&self, name: &str) -> CoreResult<Option<Tag>> {
        self.git
            .resolve_tag(name)
            .map_err(|source| CoreError::CannotFetchTag {
                name: name.to_string(),
                source,
            })
    }

    fn fetch_latest_version_tag(&self) -> CoreResult<Option<Tag>> {
        let names = self
            .git
            .list_tags()
            .map_err(CoreError::CannotFetchLatestTag)?;

        let latest = names
            .iter()
            .filter_map(|name| Version::parse(name).ok().map(|version| (version, name)))
            .max_by(|(a, _), (b, _)| a.cmp(b));

        match latest {
            Some((_, name)) => self.fetch_tag(name),
            None => Ok(None),
        }
    }
}

/// Tallies the pattern evaluations of every supporting detection and
/// resolves them with the indicator's strategy.
fn evaluate(indicator: &VersionRangeIndicator, detections: &[&dyn RangeDetection]) -> bool {
    let mut matched = 0;
    let mut unmatched = 0;

    for pattern in indicator.patterns() {
        for detection in detections.iter().filter(|d| d.supports(pattern)) {
            if detection.matches(pattern) {
                matched += 1;
            } else {
                unmatched += 1;
            }
        }
    }

    let holds = indicator.strategy().evaluate(matched, unmatched);
    debug!(
        range = %indicator.range(),
        matched,
        unmatched,
        holds,
        "evaluated indicator"
    );

    holds
}
