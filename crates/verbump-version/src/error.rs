//! Version error types.

use thiserror::Error;

use crate::VersionRange;

/// Version-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    /// The given string is not a `major.minor.patch` version.
    #[error("version \"{0}\" is not supported")]
    Unsupported(String),

    /// The given string is not a known version range.
    #[error("version range \"{0}\" is not supported")]
    RangeNotSupported(String),

    /// Increasing the version would overflow one of its components.
    #[error("version \"{version}\" cannot be increased by range \"{range}\"")]
    Overflow {
        /// The version being increased.
        version: String,
        /// The requested range.
        range: VersionRange,
    },
}

/// Result type for version operations.
pub type VersionResult<T> = Result<T, VersionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = VersionError::Unsupported("foo".to_string());
        assert_eq!(err.to_string(), "version \"foo\" is not supported");
    }

    #[test]
    fn test_range_not_supported_display() {
        let err = VersionError::RangeNotSupported("huge".to_string());
        assert_eq!(err.to_string(), "version range \"huge\" is not supported");
    }

    #[test]
    fn test_overflow_display() {
        let err = VersionError::Overflow {
            version: "1.18446744073709551615.0".to_string(),
            range: VersionRange::Minor,
        };
        assert_eq!(
            err.to_string(),
            "version \"1.18446744073709551615.0\" cannot be increased by range \"minor\""
        );
    }
}
