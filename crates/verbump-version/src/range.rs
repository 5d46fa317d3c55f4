//! Version range tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{VersionError, VersionResult};

/// Short aliases accepted in addition to the full range names.
const SHORT_RANGES: [(&str, VersionRange); 4] = [
    ("maj", VersionRange::Major),
    ("min", VersionRange::Minor),
    ("n", VersionRange::Next),
    ("p", VersionRange::Patch),
];

/// Version range used to increase a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VersionRange {
    /// Major version bump (breaking changes).
    Major,
    /// Minor version bump (new features).
    Minor,
    /// Next version, currently the same as a patch bump.
    Next,
    /// Patch version bump (bug fixes).
    Patch,
}

impl VersionRange {
    /// All ranges, ordered by descending priority.
    pub const ALL: [Self; 4] = [Self::Major, Self::Minor, Self::Next, Self::Patch];

    /// Resolves a range from user input.
    ///
    /// Input is case-insensitive and accepts both full names (`major`) and
    /// short aliases (`maj`).
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::RangeNotSupported`] for unknown input.
    pub fn from_input(input: &str) -> VersionResult<Self> {
        Self::try_from_input(input).ok_or_else(|| VersionError::RangeNotSupported(input.to_string()))
    }

    /// Resolves a range from user input, returning `None` for unknown input.
    #[must_use]
    pub fn try_from_input(input: &str) -> Option<Self> {
        let input = input.to_lowercase();

        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == input)
            .or_else(|| {
                SHORT_RANGES
                    .iter()
                    .find(|(short, _)| *short == input)
                    .map(|(_, range)| *range)
            })
    }

    /// Returns every accepted input, each full name followed by its alias.
    #[must_use]
    pub fn all() -> Vec<&'static str> {
        let mut all = Vec::with_capacity(Self::ALL.len() + SHORT_RANGES.len());

        for range in Self::ALL {
            all.push(range.as_str());
            if let Some((short, _)) = SHORT_RANGES.iter().find(|(_, r)| *r == range) {
                all.push(short);
            }
        }

        all
    }

    /// Returns the lowercase name of this range.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Next => "next",
            Self::Patch => "patch",
        }
    }

    /// Returns the priority of this range. Higher wins.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            Self::Major => 4,
            Self::Minor => 3,
            Self::Next => 2,
            Self::Patch => 1,
        }
    }

    /// Returns the range with the highest priority, or `None` if empty.
    pub fn highest(ranges: impl IntoIterator<Item = Self>) -> Option<Self> {
        ranges.into_iter().max_by_key(|range| range.priority())
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_input(s)
    }
}

impl TryFrom<String> for VersionRange {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_input(&value)
    }
}

impl From<VersionRange> for String {
    fn from(range: VersionRange) -> Self {
        range.as_str().to_string()
    }
}
