//! Helpers around the `{%version%}` placeholder token.

use crate::Version;

/// Token replaced by a version in file patterns and release templates.
pub const VERSION_PLACEHOLDER: &str = "{%version%}";

/// Returns true if the pattern contains the version placeholder.
#[must_use]
pub fn is_valid_version_pattern(pattern: &str) -> bool {
    pattern.contains(VERSION_PLACEHOLDER)
}

/// Replaces every placeholder occurrence in the pattern with the version.
#[must_use]
pub fn replace_version_in_pattern(pattern: &str, version: &Version) -> String {
    pattern.replace(VERSION_PLACEHOLDER, &version.full())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_version_pattern() {
        assert!(is_valid_version_pattern("{%version%}"));
        assert!(is_valid_version_pattern("v{%version%}"));
        assert!(!is_valid_version_pattern("{version}"));
        assert!(!is_valid_version_pattern(""));
    }

    #[test]
    fn test_replace_version_in_pattern() {
        let version = Version::new(1, 2, 3);

        assert_eq!(
            replace_version_in_pattern("Release {%version%}", &version),
            "Release 1.2.3"
        );
        assert_eq!(
            replace_version_in_pattern("{%version%}/{%version%}", &version),
            "1.2.3/1.2.3"
        );
        assert_eq!(replace_version_in_pattern("no token", &version), "no token");
    }
}
