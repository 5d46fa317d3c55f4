//! Release options.

use crate::{ConfigResult, FilePattern};

/// Default commit message template.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Release {%version%}";

/// Default tag name template.
pub const DEFAULT_TAG_NAME: &str = "{%version%}";

/// How a release commit and tag are created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    commit_message: String,
    tag_name: FilePattern,
    overwrite_existing_tag: bool,
    sign_tag: bool,
}

impl ReleaseOptions {
    /// Creates new release options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::InvalidTagName`] if the tag name lacks
    /// the version placeholder.
    pub fn new(
        commit_message: impl Into<String>,
        tag_name: impl Into<String>,
        overwrite_existing_tag: bool,
        sign_tag: bool,
    ) -> ConfigResult<Self> {
        Ok(Self {
            commit_message: commit_message.into(),
            tag_name: FilePattern::tag_name(tag_name)?,
            overwrite_existing_tag,
            sign_tag,
        })
    }

    /// Returns the commit message template.
    #[must_use]
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    /// Returns the tag name template.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        self.tag_name.original()
    }

    #[must_use]
    pub fn overwrite_existing_tag(&self) -> bool {
        self.overwrite_existing_tag
    }

    #[must_use]
    pub fn sign_tag(&self) -> bool {
        self.sign_tag
    }
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            tag_name: FilePattern::tag_name(DEFAULT_TAG_NAME).expect("invalid tag name"),
            overwrite_existing_tag: false,
            sign_tag: false,
        }
    }
}
