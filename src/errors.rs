/*!
 * Error types for the textpipe library.
 *
 * This module contains the error taxonomy of the processing core,
 * using the thiserror crate for ergonomic error definitions:
 * - `ConfigError`: load/build-time configuration problems
 * - `UnsupportedLanguageError`: a stage refused its locale pair at construction
 * - `ProcessingError`: a stage failed while processing text
 */

use std::path::PathBuf;

use thiserror::Error;

use crate::language_utils::Locale;

/// Errors raised while loading a pipeline descriptor or assembling a pipeline
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration source could not be read
    #[error("Failed to read pipeline configuration {path}: {source}")]
    Io {
        /// Path of the configuration source
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The configuration source is not well-formed JSON
    #[error("Malformed pipeline configuration: {0}")]
    Malformed(String),

    /// The configuration does not satisfy the descriptor schema
    #[error("Invalid pipeline configuration at {path}: {message}")]
    Schema {
        /// JSON path of the offending node
        path: String,
        /// What the schema expected
        message: String,
    },

    /// An element kind that is neither `processor` nor `processorGroup`
    #[error("Unknown element '{element}' at {path}")]
    UnknownElement {
        /// JSON path of the offending node
        path: String,
        /// The element name that was found
        element: String,
    },

    /// A locale filter attribute holds a tag that is not a valid language
    #[error("Invalid language '{tag}' at {path}")]
    InvalidLanguage {
        /// JSON path of the offending attribute
        path: String,
        /// The tag as written
        tag: String,
    },

    /// A class reference that is not present in the registry
    #[error("Unknown class '{0}'")]
    UnknownClass(String),

    /// A class reference that resolves to the wrong kind of constructor
    #[error("Class '{class}' has no {expected} constructor")]
    ConstructorMismatch {
        /// The class reference
        class: String,
        /// The constructor signature that was required
        expected: &'static str,
    },

    /// The constructor ran and failed for a reason other than language support
    #[error("Failed to instantiate class '{class}': {reason}")]
    Instantiation {
        /// The class reference
        class: String,
        /// Failure reported by the constructor
        reason: String,
    },

    /// The pipeline implementation identifier cannot be resolved
    #[error("Invalid pipeline class '{0}'")]
    UnknownPipeline(String),
}

/// A stage does not support the language it was constructed for
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported language: {language}")]
pub struct UnsupportedLanguageError {
    /// The rejected locale
    pub language: Locale,
}

impl UnsupportedLanguageError {
    /// Create a new error for the given locale
    pub fn new(language: &Locale) -> Self {
        Self {
            language: language.clone(),
        }
    }
}

/// Errors raised by stages while a pipeline processes text
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// A stage aborted the pipeline
    #[error("Stage #{position} ({stage}) failed: {message}")]
    StageFailed {
        /// Zero-based position of the stage inside the pipeline
        position: usize,
        /// Class reference of the stage
        stage: String,
        /// Failure description
        message: String,
    },

    /// Failure raised by a stage itself; the pipeline adds the position
    #[error("{0}")]
    Failed(String),

    /// A conversion resource could not be created
    #[error("Conversion resource {pair} unavailable: {message}")]
    Conversion {
        /// Human readable variant pair, e.g. `Simplified<->Taiwan`
        pair: String,
        /// Failure description
        message: String,
    },
}

/// Umbrella error for the three public operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from configuration loading or pipeline assembly
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A stage refused the locale pair, carrying the class that refused it
    #[error("Stage '{class}' rejected the language pair: {source}")]
    UnsupportedStage {
        /// The class reference of the stage
        class: String,
        /// The locale failure
        #[source]
        source: UnsupportedLanguageError,
    },

    /// A locale failure outside of a registry lookup
    #[error("Language error: {0}")]
    UnsupportedLanguage(#[from] UnsupportedLanguageError),

    /// Error from a stage during processing
    #[error("Processing error: {0}")]
    Processing(#[from] ProcessingError),
}

impl PipelineError {
    /// Whether this error is a configuration bug (never worth retrying)
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this error reports a language the pipeline cannot handle
    pub fn is_unsupported_language(&self) -> bool {
        matches!(self, Self::UnsupportedStage { .. } | Self::UnsupportedLanguage(_))
    }
}
