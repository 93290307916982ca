/*!
 * Declarative, locale-aware text processing pipelines.
 *
 * Data flows as: descriptor document -> `PipelineDescriptor` (loader) ->
 * `PipelineBuilder::build(source, target)` -> `ProcessingPipeline` ->
 * `process(input, metadata)`.
 *
 * # Architecture
 *
 * - `sentence` / `metadata`: the values threaded through a run
 * - `processor`: the `TextProcessor` stage contract
 * - `descriptor`: stage descriptors and locale filters
 * - `loader`: schema-validated descriptor loading
 * - `registry`: class reference to constructor mapping
 * - `pipeline`: pipeline implementations
 * - `builder`: descriptor + locale pair -> pipeline
 * - `engine`: hosting component owning shared state and built pipelines
 * - `normalization` / `chinese`: built-in stages
 */

pub mod builder;
pub mod chinese;
pub mod descriptor;
pub mod engine;
pub mod loader;
pub mod metadata;
pub mod normalization;
pub mod pipeline;
pub mod processor;
pub mod registry;
pub mod sentence;

// Re-export main types
pub use builder::{PipelineBuilder, build_pipeline};
pub use descriptor::{LanguageFilter, ProcessorDescriptor, StageDescriptor};
pub use engine::ProcessingEngine;
pub use loader::{PipelineDescriptor, load_descriptor};
pub use metadata::Metadata;
pub use pipeline::{NamedStage, ProcessingPipeline, SequentialPipeline, TimedPipeline};
pub use processor::TextProcessor;
pub use registry::{Component, ComponentRegistry};
pub use sentence::SentenceBuilder;
