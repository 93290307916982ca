/*!
 * Chinese variant normalization.
 *
 * - `variant`: Chinese written variants and unordered variant pairs
 * - `converter`: conversion resources and the loaders that create them
 * - `cache`: process-wide cache of conversion resources, one per pair
 * - `preprocessor`: the stage that brings input into the internal variant
 */

pub mod cache;
pub mod converter;
pub mod preprocessor;
pub mod variant;

pub use cache::ConversionCache;
pub use converter::{CharacterMapConverter, ChineseConverter, ConverterLoader, MappingTableLoader};
pub use preprocessor::ChinesePreprocessor;
pub use variant::{ChineseVariant, VariantPair};
