/*!
 * Chinese variant preprocessing stage.
 *
 * Brings Chinese input written in any supported variant into the
 * internal variant the rest of the system works with (Taiwan standard
 * by default).
 */

use std::sync::Arc;

use log::debug;

use crate::errors::{ProcessingError, UnsupportedLanguageError};
use crate::language_utils::Locale;
use crate::processing::metadata::Metadata;
use crate::processing::processor::TextProcessor;
use crate::processing::sentence::SentenceBuilder;

use super::cache::ConversionCache;
use super::variant::{ChineseVariant, VariantPair};

/// Metadata key recording the variant the input was read as
pub const VARIANT_KEY: &str = "chinese.variant";

/// Variant used internally when the host does not configure one
pub const DEFAULT_INTERNAL_VARIANT: ChineseVariant = ChineseVariant::Taiwan;

/// Converts Chinese input into the internal variant
#[derive(Debug)]
pub struct ChinesePreprocessor {
    source_variant: ChineseVariant,
    internal_variant: ChineseVariant,
    cache: Arc<ConversionCache>,
}

impl ChinesePreprocessor {
    /// Create a preprocessor for the given locale pair.
    ///
    /// Fails when `source` is not a Chinese variant this stage supports.
    /// The check runs once here, never per call.
    pub fn new(
        source: &Locale,
        _target: &Locale,
        internal_variant: ChineseVariant,
        cache: Arc<ConversionCache>,
    ) -> Result<Self, UnsupportedLanguageError> {
        let source_variant = ChineseVariant::from_locale(source).ok_or_else(|| UnsupportedLanguageError::new(source))?;

        Ok(Self {
            source_variant,
            internal_variant,
            cache,
        })
    }

    /// Variant the input is expected to be written in
    pub fn source_variant(&self) -> ChineseVariant {
        self.source_variant
    }

    /// Variant the output is written in
    pub fn internal_variant(&self) -> ChineseVariant {
        self.internal_variant
    }
}

impl TextProcessor for ChinesePreprocessor {
    fn call(&self, input: SentenceBuilder, metadata: &mut Metadata) -> Result<SentenceBuilder, ProcessingError> {
        metadata.insert(VARIANT_KEY, self.source_variant.name());

        if self.source_variant == self.internal_variant {
            return Ok(input);
        }

        let pair = VariantPair::new(self.source_variant, self.internal_variant);
        let converter = self.cache.get_or_load(pair)?;
        let converted = converter.convert(input.as_str(), self.source_variant, self.internal_variant)?;

        debug!("Converted input {} -> {}", self.source_variant, self.internal_variant);
        Ok(input.with_text(converted))
    }
}
