//! Configuration options for content extraction.
//!
//! The `Options` struct carries the thresholds used by the cleaner, the
//! scoring engine and the content selector. One default set is shared by
//! every variant profile; profiles only change the shape of the score.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings, or [`Options::from_json`] to load a partial
/// configuration where missing fields keep their defaults.
///
/// # Example
///
/// ```rust
/// use rs_distill::Options;
///
/// let options = Options {
///     include_comments: true,
///     min_score: 15,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Minimum text length (see [`crate::text_metrics::text_length`]) for a
    /// node to count as content-bearing.
    ///
    /// Default: `25`
    pub min_text_length: usize,

    /// Minimum score for a node to be accepted as main content.
    ///
    /// Default: `20`
    pub min_score: i32,

    /// Maximum fraction of a node's text that may sit inside links.
    ///
    /// Default: `0.5`
    pub max_link_density: f64,

    /// Keep comment sections and HTML comment nodes.
    ///
    /// Default: `false`
    pub include_comments: bool,

    /// Lower text-length threshold for the single re-attempt made when no
    /// node in the document clears `min_text_length`.
    ///
    /// Default: `10`
    pub retry_length: usize,

    /// Resolve relative `href`/`src` attributes against the source URL.
    ///
    /// Default: `true`
    pub resolve_urls: bool,

    /// Rewrite TeX math and backtick code spans found in text into tagged
    /// markup for downstream renderers.
    ///
    /// Default: `true`
    pub markup_math_and_code: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_text_length: 25,
            min_score: 20,
            max_link_density: 0.5,
            include_comments: false,
            retry_length: 10,
            resolve_urls: true,
            markup_math_and_code: true,
        }
    }
}

impl Options {
    /// Load options from a JSON object. Fields not present keep their
    /// default values. The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] for malformed JSON and
    /// [`Error::InvalidOptions`] when validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the thresholds for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if `max_link_density` is outside
    /// `[0, 1]` or `retry_length` exceeds `min_text_length`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.max_link_density) {
            return Err(Error::InvalidOptions(format!(
                "max_link_density must be within [0, 1], got {}",
                self.max_link_density
            )));
        }
        if self.retry_length > self.min_text_length {
            return Err(Error::InvalidOptions(format!(
                "retry_length ({}) must not exceed min_text_length ({})",
                self.retry_length, self.min_text_length
            )));
        }
        Ok(())
    }
}
