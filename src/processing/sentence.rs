/*!
 * The structured text value that flows through a pipeline.
 */

use std::fmt;

/// Mutable text value threaded through every stage.
///
/// Keeps the untouched original next to the current text so that later
/// stages (and callers) can still see what the pipeline was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceBuilder {
    original: String,
    current: String,
}

impl SentenceBuilder {
    /// Create a builder whose original and current text are `text`
    pub fn new(text: impl Into<String>) -> Self {
        let original = text.into();
        Self {
            current: original.clone(),
            original,
        }
    }

    /// The text as handed to the pipeline
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The text after every edit applied so far
    pub fn as_str(&self) -> &str {
        &self.current
    }

    /// Replace the current text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.current = text.into();
    }

    /// Replace the current text, consuming and returning the builder
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Whether any stage changed the text
    pub fn is_modified(&self) -> bool {
        self.original != self.current
    }

    /// Whether the current text is empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Consume the builder and return the current text
    pub fn into_string(self) -> String {
        self.current
    }
}

impl fmt::Display for SentenceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.current)
    }
}

impl From<&str> for SentenceBuilder {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SentenceBuilder {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
