/*!
 * Pipeline assembly.
 *
 * Resolves a descriptor against a concrete (source, target) locale pair:
 * every processor is checked in declaration order, the accepted ones are
 * instantiated, and the resulting stage list is handed to the configured
 * pipeline implementation. Filtering never reorders stages.
 */

use log::info;

use crate::errors::PipelineError;
use crate::language_utils::Locale;

use super::loader::PipelineDescriptor;
use super::pipeline::{NamedStage, ProcessingPipeline};
use super::registry::{ComponentRegistry, SEQUENTIAL_PIPELINE};

/// Builds pipelines from descriptors using a component registry
#[derive(Debug, Clone, Copy)]
pub struct PipelineBuilder<'a> {
    registry: &'a ComponentRegistry,
}

impl<'a> PipelineBuilder<'a> {
    /// Create a builder resolving class references against `registry`
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Build a fresh pipeline for the locale pair.
    ///
    /// Calling this twice with the same descriptor and pair yields
    /// pipelines with the same stage classes in the same order, backed by
    /// new stage instances.
    pub fn build(
        &self,
        descriptor: &PipelineDescriptor,
        source: &Locale,
        target: &Locale,
    ) -> Result<Box<dyn ProcessingPipeline>, PipelineError> {
        let mut stages: Vec<NamedStage> = Vec::new();

        for entry in descriptor.stages() {
            for processor in entry.accepted(source, target) {
                stages.push(processor.create(self.registry, source, target)?);
            }
        }

        let implementation = descriptor.implementation().unwrap_or(SEQUENTIAL_PIPELINE);
        let pipeline = self
            .registry
            .create_pipeline(implementation, stages, source, target)?;

        info!(
            "Built {} pipeline for {} -> {}: [{}]",
            implementation,
            source,
            target,
            pipeline.stage_names().join(", ")
        );

        Ok(pipeline)
    }
}

/// Build a pipeline for the locale pair from `descriptor`
pub fn build_pipeline(
    registry: &ComponentRegistry,
    descriptor: &PipelineDescriptor,
    source: &Locale,
    target: &Locale,
) -> Result<Box<dyn ProcessingPipeline>, PipelineError> {
    PipelineBuilder::new(registry).build(descriptor, source, target)
}
