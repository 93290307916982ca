/*!
 * Whitespace normalization stage.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ProcessingError;

use super::metadata::Metadata;
use super::processor::TextProcessor;
use super::sentence::SentenceBuilder;

static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

/// Drops leading and trailing whitespace and collapses interior runs to one space
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceNormalizer;

impl WhitespaceNormalizer {
    /// Create a normalizer; it applies to every language
    pub fn new() -> Self {
        Self
    }

    /// Normalize a string
    pub fn normalize(text: &str) -> String {
        WHITESPACE_RUN_REGEX.replace_all(text.trim(), " ").into_owned()
    }
}

impl TextProcessor for WhitespaceNormalizer {
    fn call(&self, input: SentenceBuilder, _metadata: &mut Metadata) -> Result<SentenceBuilder, ProcessingError> {
        let normalized = Self::normalize(input.as_str());
        if normalized == input.as_str() {
            return Ok(input);
        }
        Ok(input.with_text(normalized))
    }
}
