//! Version placeholder templates compiled to regular expressions.

use std::fmt;

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};
use verbump_version::{VERSION_PLACEHOLDER, is_valid_version_pattern};

use crate::{ConfigError, ConfigResult};

/// Name of the capture group holding the matched version.
pub(crate) const VERSION_GROUP: &str = "version";

const VERSION_REGEX: &str = r"[0-9]+\.[0-9]+\.[0-9]+";
const TAG_VERSION_REGEX: &str = r"v?[0-9]+\.[0-9]+\.[0-9]+";

/// Matches the whitespace a line break in a template stands for.
const LINE_BREAK_REGEX: &str = r"\s+";

/// A template such as `"version": "{%version%}"` compiled into a regex.
///
/// Literal text is matched verbatim, except that a line break together
/// with the indentation around it matches any run of whitespace. The first
/// placeholder becomes the `version` capture group, later placeholders
/// match a version without capturing it.
///
/// Matching works on raw bytes, so files in encodings other than UTF-8 can
/// be bumped as long as the version itself is ASCII.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilePattern {
    original: String,
    regex: Regex,
}

impl FilePattern {
    /// Compiles a file pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFilePattern`] if the template lacks the
    /// version placeholder.
    pub fn new(template: impl Into<String>) -> ConfigResult<Self> {
        let original = template.into();
        if !is_valid_version_pattern(&original) {
            return Err(ConfigError::InvalidFilePattern(original));
        }

        let regex = compile(&original, VERSION_REGEX)?;
        Ok(Self { original, regex })
    }

    /// Compiles a tag name template, accepting an optional `v` prefix on
    /// the version.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTagName`] if the template lacks the
    /// version placeholder.
    pub fn tag_name(template: impl Into<String>) -> ConfigResult<Self> {
        let original = template.into();
        if !is_valid_version_pattern(&original) {
            return Err(ConfigError::InvalidTagName(original));
        }

        let regex = compile(&original, TAG_VERSION_REGEX)?;
        Ok(Self { original, regex })
    }

    /// Returns the template as written.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns the byte offset and text of every captured version, in
    /// order of appearance.
    pub fn find_versions<'t>(&self, text: &'t [u8]) -> impl Iterator<Item = (usize, &'t str)> {
        self.regex
            .captures_iter(text)
            .filter_map(|captures| captures.name(VERSION_GROUP))
            .filter_map(|found| {
                std::str::from_utf8(found.as_bytes())
                    .ok()
                    .map(|version| (found.start(), version))
            })
    }
}

fn compile(template: &str, version_regex: &str) -> ConfigResult<Regex> {
    let mut expression = String::with_capacity(template.len() * 2);

    for (index, literal) in template.split(VERSION_PLACEHOLDER).enumerate() {
        match index {
            0 => {}
            1 => expression.push_str(&format!("(?P<{VERSION_GROUP}>{version_regex})")),
            _ => expression.push_str(&format!("(?:{version_regex})")),
        }
        push_literal(&mut expression, literal);
    }

    Regex::new(&expression).map_err(|source| ConfigError::InvalidRegex {
        pattern: template.to_string(),
        source,
    })
}

fn push_literal(expression: &mut String, literal: &str) {
    let lines: Vec<&str> = literal.split('\n').collect();
    let last = lines.len() - 1;

    for (index, line) in lines.into_iter().enumerate() {
        let mut line = line;
        if index > 0 {
            expression.push_str(LINE_BREAK_REGEX);
            line = line.trim_start();
        }
        if index < last {
            line = line.trim_end();
        }
        expression.push_str(&regex::escape(line));
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original && self.regex.as_str() == other.regex.as_str()
    }
}

impl Eq for FilePattern {}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<String> for FilePattern {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FilePattern> for String {
    fn from(pattern: FilePattern) -> Self {
        pattern.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_placeholder_fails() {
        let result = FilePattern::new("version: 1.0.0");
        assert!(matches!(result, Err(ConfigError::InvalidFilePattern(p)) if p == "version: 1.0.0"));
    }

    #[test]
    fn test_new_compiles_named_group() {
        let pattern = FilePattern::new("version: {%version%}").unwrap();
        assert_eq!(pattern.original(), "version: {%version%}");
        assert_eq!(pattern.regex.as_str(), r"version: (?P<version>[0-9]+\.[0-9]+\.[0-9]+)");
    }

    #[test]
    fn test_new_escapes_metacharacters() {
        let pattern = FilePattern::new("$version = [{%version%}] (*.+?)").unwrap();
        assert_eq!(
            pattern.regex.as_str(),
            r"\$version = \[(?P<version>[0-9]+\.[0-9]+\.[0-9]+)\] \(\*\.\+\?\)"
        );

        assert!(pattern.regex.is_match(b"$version = [1.2.3] (*.+?)"));
        assert!(!pattern.regex.is_match(b"xversion = [1.2.3] (*.+?)"));
        assert!(!pattern.regex.is_match(b"$version = [1.2.3] (a.+?)"));
    }

    #[test]
    fn test_new_keeps_slashes_literal() {
        let pattern = FilePattern::new("https://example.com/v{%version%}/").unwrap();
        let found: Vec<_> = pattern
            .find_versions(b"see https://example.com/v1.0.0/ for details")
            .collect();
        assert_eq!(found, vec![(25, "1.0.0")]);
    }

    #[test]
    fn test_new_does_not_match_prefixed_version() {
        let pattern = FilePattern::new("\"version\": \"{%version%}\"").unwrap();
        assert!(pattern.regex.is_match(b"\"version\": \"1.2.3\""));
        assert!(!pattern.regex.is_match(b"\"version\": \"v1.2.3\""));
    }

    #[test]
    fn test_new_multiple_placeholders() {
        let pattern = FilePattern::new("{%version%} -> {%version%}").unwrap();
        let captures = pattern.regex.captures(b"1.0.0 -> 2.0.0").unwrap();
        assert_eq!(&captures[VERSION_GROUP], b"1.0.0");
        assert_eq!(captures.len(), 2);
    }

    #[test]
    fn test_find_versions() {
        let pattern = FilePattern::new("\"version\": \"{%version%}\"").unwrap();
        let text = "{\"version\": \"1.0.0\", \"deps\": {\"version\": \"2.3.4\"}}";

        let found: Vec<_> = pattern.find_versions(text.as_bytes()).collect();
        assert_eq!(found, vec![(13, "1.0.0"), (42, "2.3.4")]);
    }

    #[test]
    fn test_find_versions_in_non_utf8_text() {
        let pattern = FilePattern::new("'version' => '{%version%}'").unwrap();
        let text = b"'author' => 'J\xfcrgen',\n'version' => '1.0.0',\n";

        let found: Vec<_> = pattern.find_versions(text).collect();
        assert_eq!(found, vec![(36, "1.0.0")]);
    }

    #[test]
    fn test_find_versions_ignores_non_ascii_digits() {
        let pattern = FilePattern::new("v{%version%}").unwrap();
        assert_eq!(pattern.find_versions("v\u{661}.2.3".as_bytes()).count(), 0);
    }

    #[test]
    fn test_new_line_breaks_match_any_whitespace() {
        let pattern = FilePattern::new("\"name\": \"app\",\n  \"version\": \"{%version%}\"").unwrap();
        assert_eq!(
            pattern.regex.as_str(),
            r#""name": "app",\s+"version": "(?P<version>[0-9]+\.[0-9]+\.[0-9]+)""#
        );

        let text = "\"name\": \"app\",\r\n\t\"version\": \"1.0.0\"";
        let found: Vec<_> = pattern.find_versions(text.as_bytes()).collect();
        assert_eq!(found, vec![(29, "1.0.0")]);

        assert_eq!(
            pattern
                .find_versions(b"\"name\": \"app\", \"version\": \"1.0.0\"")
                .count(),
            1
        );
        assert_eq!(
            pattern
                .find_versions(b"\"name\": \"app\",\"version\": \"1.0.0\"")
                .count(),
            0
        );
    }

    #[test]
    fn test_tag_name_accepts_prefix() {
        let pattern = FilePattern::tag_name("release-{%version%}").unwrap();
        let found: Vec<_> = pattern.find_versions(b"release-v2.0.0").collect();
        assert_eq!(found, vec![(8, "v2.0.0")]);
    }

    #[test]
    fn test_tag_name_without_placeholder_fails() {
        let result = FilePattern::tag_name("latest");
        assert!(matches!(result, Err(ConfigError::InvalidTagName(_))));
    }

    #[test]
    fn test_serde() {
        let pattern: FilePattern = serde_json::from_str("\"v{%version%}\"").unwrap();
        assert_eq!(pattern, FilePattern::new("v{%version%}").unwrap());
        assert_eq!(serde_json::to_string(&pattern).unwrap(), "\"v{%version%}\"");

        assert!(serde_json::from_str::<FilePattern>("\"v1\"").is_err());
    }
}
