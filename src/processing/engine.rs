/*!
 * Hosting component for processing pipelines.
 *
 * The engine parses the descriptor once, owns the component registry and
 * the conversion cache shared by the Chinese preprocessors, and keeps one
 * built pipeline per (source, target) pair.
 */

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};
use parking_lot::RwLock;

use crate::app_config::Config;
use crate::errors::PipelineError;
use crate::language_utils::Locale;

use super::builder::PipelineBuilder;
use super::chinese::{ConversionCache, MappingTableLoader};
use super::loader::PipelineDescriptor;
use super::metadata::Metadata;
use super::pipeline::ProcessingPipeline;
use super::registry::ComponentRegistry;
use super::sentence::SentenceBuilder;

type PipelineKey = (Locale, Locale);

/// Owns the descriptor, registry and shared caches; memoizes built pipelines
pub struct ProcessingEngine {
    descriptor: PipelineDescriptor,
    registry: ComponentRegistry,
    cache: Arc<ConversionCache>,
    pipelines: RwLock<HashMap<PipelineKey, Arc<dyn ProcessingPipeline>>>,
}

impl ProcessingEngine {
    /// Create an engine from host configuration with the built-in stages
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let descriptor = match &config.pipeline_file {
            Some(path) => PipelineDescriptor::load_from_file(path)?,
            None => PipelineDescriptor::builtin()?,
        };

        let cache = Arc::new(ConversionCache::new(Arc::new(MappingTableLoader::new())));
        let registry = ComponentRegistry::with_builtins(Arc::clone(&cache), config.chinese.variant()?);

        Ok(Self::with_parts(descriptor, registry, cache))
    }

    /// Create an engine from explicit parts
    pub fn with_parts(descriptor: PipelineDescriptor, registry: ComponentRegistry, cache: Arc<ConversionCache>) -> Self {
        Self {
            descriptor,
            registry,
            cache,
            pipelines: RwLock::new(HashMap::new()),
        }
    }

    /// The pipeline for a locale pair, built on first request.
    ///
    /// Building happens outside the lock; if two callers race on a new
    /// pair the first pipeline stored wins and both receive it.
    pub fn pipeline(&self, source: &Locale, target: &Locale) -> Result<Arc<dyn ProcessingPipeline>, PipelineError> {
        let key = (source.clone(), target.clone());

        if let Some(pipeline) = self.pipelines.read().get(&key) {
            return Ok(Arc::clone(pipeline));
        }

        let built: Arc<dyn ProcessingPipeline> = PipelineBuilder::new(&self.registry)
            .build(&self.descriptor, source, target)
            .inspect_err(|e| {
                if e.is_unsupported_language() {
                    warn!("No pipeline for {} -> {}: {}", source, target, e);
                }
            })?
            .into();

        let mut pipelines = self.pipelines.write();
        let pipeline = Arc::clone(pipelines.entry(key).or_insert(built));
        info!("Pipelines cached: {}", pipelines.len());
        Ok(pipeline)
    }

    /// Process one text for a locale pair with fresh metadata
    pub fn process(&self, source: &Locale, target: &Locale, text: &str) -> Result<String, PipelineError> {
        let pipeline = self.pipeline(source, target)?;
        let mut metadata = Metadata::new();
        let output = pipeline.process(SentenceBuilder::new(text), &mut metadata)?;
        Ok(output.into_string())
    }

    /// The descriptor the engine builds from
    pub fn descriptor(&self) -> &PipelineDescriptor {
        &self.descriptor
    }

    /// The registry class references are resolved against
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The conversion cache shared by every pipeline of this engine
    pub fn conversion_cache(&self) -> &Arc<ConversionCache> {
        &self.cache
    }

    /// Number of pipelines built so far
    pub fn cached_pipelines(&self) -> usize {
        self.pipelines.read().len()
    }
}
