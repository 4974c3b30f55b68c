//! Document-level configuration read by the render rules.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Attributes;

/// Separator used to split a document title into title and subtitle.
pub const DEFAULT_TITLE_SEPARATOR: &str = ": ";

/// What to do with a host-relative image target when no base URL is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageBasePolicy {
    /// Treat the missing base URL as an empty prefix.
    #[default]
    Lenient,
    /// Fail with [`Error::MissingConfiguration`].
    Strict,
}

impl FromStr for ImageBasePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ImageBasePolicy::Lenient),
            "strict" => Ok(ImageBasePolicy::Strict),
            other => Err(Error::InvalidAttribute(format!(
                "image-base-url-policy must be `lenient` or `strict`, got `{other}`"
            ))),
        }
    }
}

/// Configuration for Gemtext rendering.
///
/// Every field maps to a document attribute of the same (kebab-case) name.
/// Empty attribute values count as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemtextConfig {
    /// `title-separator`
    pub title_separator: String,
    /// `author-prefix`
    pub author_prefix: Option<String>,
    /// `keywords-prefix`
    pub keywords_prefix: Option<String>,
    /// `links-heading`
    pub links_heading: Option<String>,
    /// `footnotes-heading`
    pub footnotes_heading: Option<String>,
    /// `image-base-url`
    pub image_base_url: Option<String>,
    /// `image-base-url-policy`
    pub image_base_policy: ImageBasePolicy,
}

impl Default for GemtextConfig {
    fn default() -> Self {
        Self {
            title_separator: DEFAULT_TITLE_SEPARATOR.to_string(),
            author_prefix: None,
            keywords_prefix: None,
            links_heading: None,
            footnotes_heading: None,
            image_base_url: None,
            image_base_policy: ImageBasePolicy::default(),
        }
    }
}

impl GemtextConfig {
    /// Resolve configuration from document attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAttribute`] for an unknown image policy.
    pub fn from_attributes(attrs: &Attributes) -> Result<Self> {
        let owned = |key: &str| attrs.get_str(key).map(str::to_string);

        let image_base_policy = match attrs.get_str("image-base-url-policy") {
            Some(value) => value.parse()?,
            None => ImageBasePolicy::default(),
        };

        Ok(Self {
            title_separator: owned("title-separator")
                .unwrap_or_else(|| DEFAULT_TITLE_SEPARATOR.to_string()),
            author_prefix: owned("author-prefix"),
            keywords_prefix: owned("keywords-prefix"),
            links_heading: owned("links-heading"),
            footnotes_heading: owned("footnotes-heading"),
            image_base_url: owned("image-base-url"),
            image_base_policy,
        })
    }
}
