//! Version value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{VersionError, VersionRange, VersionResult};

/// A `major.minor.patch` version.
///
/// Versions are immutable: [`Version::increase`] returns a new value.
/// Parsing accepts an optional `v` prefix, formatting never emits one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    inner: semver::Version,
}

impl Version {
    /// Creates a new version.
    #[must_use]
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            inner: semver::Version::new(major, minor, patch),
        }
    }

    /// Parses a version string such as `1.2.3` or `v1.2.3`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Unsupported`] if the string is not made of
    /// exactly three dot-separated numbers.
    pub fn parse(version: &str) -> VersionResult<Self> {
        let unsupported = || VersionError::Unsupported(version.to_string());

        let digits = version.strip_prefix('v').unwrap_or(version);
        let mut parts = digits.split('.').map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse::<u64>().ok()
        });

        let (Some(Some(major)), Some(Some(minor)), Some(Some(patch)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(unsupported());
        };

        Ok(Self::new(major, minor, patch))
    }

    /// Returns a new version increased by the given range.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Overflow`] if the increased component does
    /// not fit in a `u64`.
    pub fn increase(&self, range: VersionRange) -> VersionResult<Self> {
        let overflow = || VersionError::Overflow {
            version: self.full(),
            range,
        };
        let mut next = self.inner.clone();

        match range {
            VersionRange::Major => {
                next.major = next.major.checked_add(1).ok_or_else(overflow)?;
                next.minor = 0;
                next.patch = 0;
            }
            VersionRange::Minor => {
                next.minor = next.minor.checked_add(1).ok_or_else(overflow)?;
                next.patch = 0;
            }
            VersionRange::Next | VersionRange::Patch => {
                next.patch = next.patch.checked_add(1).ok_or_else(overflow)?;
            }
        }

        Ok(Self { inner: next })
    }

    /// Returns the major component.
    #[must_use]
    pub fn major(&self) -> u64 {
        self.inner.major
    }

    /// Returns the minor component.
    #[must_use]
    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    /// Returns the patch component.
    #[must_use]
    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Returns the textual form, `major.minor.patch`.
    #[must_use]
    pub fn full(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.full()
    }
}
