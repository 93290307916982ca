/*!
 * # textpipe - declarative, locale-aware text processing pipelines
 *
 * A Rust library that loads a pipeline descriptor, resolves which stages
 * apply to a source/target language pair, and composes them into an
 * executable pipeline that threads text and side-channel metadata
 * through each stage in declared order.
 *
 * ## Features
 *
 * - Schema-validated JSON pipeline descriptors
 * - Per-stage source/target language filters and stage groups
 * - Compile-time component registry for stages and pipeline implementations
 * - Immutable pipelines safe to share between threads
 * - Chinese variant preprocessing backed by a shared, lazily filled cache
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Host configuration
 * - `language_utils`: ISO language codes and the `Locale` type
 * - `processing`: Pipeline framework and built-in stages:
 *   - `processing::loader`: Descriptor loading and schema validation
 *   - `processing::builder`: Pipeline assembly for a locale pair
 *   - `processing::pipeline`: Pipeline implementations
 *   - `processing::chinese`: Chinese variant preprocessing
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod processing;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ConfigError, PipelineError, ProcessingError, UnsupportedLanguageError};
pub use language_utils::{Locale, get_language_name, language_codes_match, normalize_to_part2t};
pub use processing::{
    ComponentRegistry, Metadata, PipelineBuilder, PipelineDescriptor, ProcessingEngine, ProcessingPipeline,
    SentenceBuilder, TextProcessor, build_pipeline, load_descriptor,
};
