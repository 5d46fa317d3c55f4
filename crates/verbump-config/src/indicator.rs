//! Rules used to detect a version range from git history.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use verbump_version::VersionRange;

use crate::{ConfigError, ConfigResult};

/// Inline flags accepted in delimiter-style patterns.
const DELIMITER_FLAGS: &str = "imsxU";

/// What a [`VersionRangePattern`] is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndicatorType {
    /// Subject lines of commits since the last release.
    CommitMessage,
    /// Paths added since the last release.
    FileAdded,
    /// Paths deleted since the last release.
    FileDeleted,
    /// Paths modified since the last release.
    FileModified,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CommitMessage => "commitMessage",
            Self::FileAdded => "fileAdded",
            Self::FileDeleted => "fileDeleted",
            Self::FileModified => "fileModified",
        };
        f.write_str(name)
    }
}

/// How the pattern evaluations of an indicator combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndicatorStrategy {
    /// No evaluated pattern may fail.
    MatchAll,
    /// At least one evaluated pattern must match.
    #[default]
    MatchAny,
    /// No evaluated pattern may match.
    MatchNone,
}

impl IndicatorStrategy {
    /// Resolves the strategy against tallied evaluations.
    #[must_use]
    pub fn evaluate(self, matched: usize, unmatched: usize) -> bool {
        match self {
            Self::MatchAll => unmatched == 0,
            Self::MatchAny => matched > 0,
            Self::MatchNone => matched == 0,
        }
    }
}

/// A typed regular expression.
#[derive(Debug, Clone)]
pub struct VersionRangePattern {
    indicator_type: IndicatorType,
    original: String,
    regex: Regex,
}

impl VersionRangePattern {
    /// Compiles a pattern.
    ///
    /// Patterns in delimiter form (`/^feat:/i`) are translated to inline
    /// flags (`(?i)^feat:`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegex`] if the expression does not compile.
    pub fn new(indicator_type: IndicatorType, pattern: impl Into<String>) -> ConfigResult<Self> {
        let original = pattern.into();
        let expression = translate_delimited(&original);

        let regex = Regex::new(&expression).map_err(|source| ConfigError::InvalidRegex {
            pattern: original.clone(),
            source,
        })?;

        Ok(Self {
            indicator_type,
            original,
            regex,
        })
    }

    #[must_use]
    pub fn indicator_type(&self) -> IndicatorType {
        self.indicator_type
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns true if the text matches.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for VersionRangePattern {
    fn eq(&self, other: &Self) -> bool {
        self.indicator_type == other.indicator_type && self.original == other.original
    }
}

impl Eq for VersionRangePattern {}

fn translate_delimited(pattern: &str) -> String {
    let Some(rest) = pattern.strip_prefix('/') else {
        return pattern.to_string();
    };
    let Some(end) = rest.rfind('/') else {
        return pattern.to_string();
    };

    let (body, flags) = (&rest[..end], &rest[end + 1..]);
    if !flags.chars().all(|flag| DELIMITER_FLAGS.contains(flag)) {
        return pattern.to_string();
    }

    let body = body.replace(r"\/", "/");
    if flags.is_empty() {
        body
    } else {
        format!("(?{flags}){body}")
    }
}

/// A range selected when its patterns satisfy its strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRangeIndicator {
    range: VersionRange,
    patterns: Vec<VersionRangePattern>,
    strategy: IndicatorStrategy,
}

impl VersionRangeIndicator {
    /// Creates a new indicator.
    #[must_use]
    pub fn new(
        range: VersionRange,
        patterns: Vec<VersionRangePattern>,
        strategy: IndicatorStrategy,
    ) -> Self {
        Self {
            range,
            patterns,
            strategy,
        }
    }

    #[must_use]
    pub fn range(&self) -> VersionRange {
        self.range
    }

    #[must_use]
    pub fn patterns(&self) -> &[VersionRangePattern] {
        &self.patterns
    }

    #[must_use]
    pub fn strategy(&self) -> IndicatorStrategy {
        self.strategy
    }
}
