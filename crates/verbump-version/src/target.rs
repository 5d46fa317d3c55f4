//! Target of a version bump.

use std::fmt;

use crate::{Version, VersionError, VersionRange, VersionResult};

/// What a bump moves matched versions to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionTarget {
    /// Increase each matched version by a range.
    Range(VersionRange),
    /// Set each matched version to this exact value.
    Explicit(Version),
}

impl VersionTarget {
    /// Resolves a target from user input.
    ///
    /// Range names are tried first, then explicit versions.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Unsupported`] if the input is neither a range
    /// nor a valid version.
    pub fn from_input(input: &str) -> VersionResult<Self> {
        if let Some(range) = VersionRange::try_from_input(input) {
            return Ok(Self::Range(range));
        }

        Version::parse(input)
            .map(Self::Explicit)
            .map_err(|_| VersionError::Unsupported(input.to_string()))
    }

    /// Computes the version a matched version is moved to.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Overflow`] if a range cannot increase the
    /// current version.
    pub fn apply(&self, current: &Version) -> VersionResult<Version> {
        match self {
            Self::Range(range) => current.increase(*range),
            Self::Explicit(version) => Ok(version.clone()),
        }
    }
}

impl From<VersionRange> for VersionTarget {
    fn from(range: VersionRange) -> Self {
        Self::Range(range)
    }
}

impl From<Version> for VersionTarget {
    fn from(version: Version) -> Self {
        Self::Explicit(version)
    }
}

impl fmt::Display for VersionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(range) => range.fmt(f),
            Self::Explicit(version) => version.fmt(f),
        }
    }
}
