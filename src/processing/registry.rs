/*!
 * Component registry.
 *
 * Maps the class references used in pipeline descriptors to constructor
 * functions. Every stage and pipeline implementation is known when the
 * crate is compiled, so resolution is a map lookup rather than dynamic
 * loading. Hosts add their own stages with `register_processor`.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::errors::{ConfigError, PipelineError};
use crate::language_utils::Locale;

use super::chinese::{ChinesePreprocessor, ChineseVariant, ConversionCache};
use super::normalization::WhitespaceNormalizer;
use super::pipeline::{NamedStage, ProcessingPipeline, SequentialPipeline, TimedPipeline};
use super::processor::TextProcessor;

/// Class reference of the whitespace normalizer
pub const WHITESPACE_NORMALIZER: &str = "whitespace_normalizer";

/// Class reference of the Chinese variant preprocessor
pub const CHINESE_PREPROCESSOR: &str = "chinese_preprocessor";

/// Identifier of the default pipeline implementation
pub const SEQUENTIAL_PIPELINE: &str = "sequential";

/// Identifier of the pipeline implementation that records stage timings
pub const TIMED_PIPELINE: &str = "timed";

/// Constructor of a stage for a (source, target) locale pair
pub type ProcessorConstructor =
    Arc<dyn Fn(&Locale, &Locale) -> Result<Box<dyn TextProcessor>, PipelineError> + Send + Sync>;

/// Constructor of a pipeline implementation from its assembled stages
pub type PipelineConstructor = Arc<
    dyn Fn(Vec<NamedStage>, &Locale, &Locale) -> Result<Box<dyn ProcessingPipeline>, ConfigError>
        + Send
        + Sync,
>;

/// A registered component
#[derive(Clone)]
pub enum Component {
    /// A stage taking the (source, target) locale pair
    Processor(ProcessorConstructor),
    /// A pipeline implementation taking the ordered stage list
    Pipeline(PipelineConstructor),
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processor(_) => f.write_str("Processor"),
            Self::Pipeline(_) => f.write_str("Pipeline"),
        }
    }
}

/// Registry of stage and pipeline constructors keyed by class reference
#[derive(Clone, Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Component>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in pipelines and stages.
    ///
    /// The Chinese preprocessor shares `cache` with every instance it
    /// creates and normalizes into `internal_variant`.
    pub fn with_builtins(cache: Arc<ConversionCache>, internal_variant: ChineseVariant) -> Self {
        let mut registry = Self::new();
        registry.register_builtin_pipelines();

        registry.register_processor(WHITESPACE_NORMALIZER, |_, _| {
            Ok(Box::new(WhitespaceNormalizer::new()) as Box<dyn TextProcessor>)
        });

        registry.register_processor(CHINESE_PREPROCESSOR, move |source, target| {
            let processor = ChinesePreprocessor::new(source, target, internal_variant, Arc::clone(&cache))?;
            Ok(Box::new(processor) as Box<dyn TextProcessor>)
        });

        registry
    }

    /// Register the `sequential` and `timed` pipeline implementations
    pub fn register_builtin_pipelines(&mut self) {
        self.register_pipeline(SEQUENTIAL_PIPELINE, |stages, source, target| {
            Ok(Box::new(SequentialPipeline::new(stages, source, target)) as Box<dyn ProcessingPipeline>)
        });
        self.register_pipeline(TIMED_PIPELINE, |stages, source, target| {
            Ok(Box::new(TimedPipeline::new(stages, source, target)) as Box<dyn ProcessingPipeline>)
        });
    }

    /// Register a stage constructor, replacing any component with the same name
    pub fn register_processor<F>(&mut self, class: &str, constructor: F)
    where
        F: Fn(&Locale, &Locale) -> Result<Box<dyn TextProcessor>, PipelineError> + Send + Sync + 'static,
    {
        self.components
            .insert(class.to_string(), Component::Processor(Arc::new(constructor)));
    }

    /// Register a pipeline constructor, replacing any component with the same name
    pub fn register_pipeline<F>(&mut self, id: &str, constructor: F)
    where
        F: Fn(Vec<NamedStage>, &Locale, &Locale) -> Result<Box<dyn ProcessingPipeline>, ConfigError>
            + Send
            + Sync
            + 'static,
    {
        self.components
            .insert(id.to_string(), Component::Pipeline(Arc::new(constructor)));
    }

    /// Whether a component with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Look up a component by name
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the stage registered as `class` for the locale pair.
    ///
    /// Language refusals surface as `PipelineError::UnsupportedStage`; any
    /// other constructor failure becomes `ConfigError::Instantiation`.
    pub fn create_processor(
        &self,
        class: &str,
        source: &Locale,
        target: &Locale,
    ) -> Result<Box<dyn TextProcessor>, PipelineError> {
        let constructor = match self.components.get(class) {
            Some(Component::Processor(constructor)) => constructor,
            Some(Component::Pipeline(_)) => {
                return Err(ConfigError::ConstructorMismatch {
                    class: class.to_string(),
                    expected: "(source, target) processor",
                }
                .into());
            }
            None => return Err(ConfigError::UnknownClass(class.to_string()).into()),
        };

        debug!("Instantiating processor '{}' for {} -> {}", class, source, target);

        constructor(source, target).map_err(|error| match error {
            PipelineError::UnsupportedLanguage(source) => PipelineError::UnsupportedStage {
                class: class.to_string(),
                source,
            },
            error @ PipelineError::UnsupportedStage { .. } => error,
            other => ConfigError::Instantiation {
                class: class.to_string(),
                reason: other.to_string(),
            }
            .into(),
        })
    }

    /// Instantiate the pipeline implementation registered as `id`
    pub fn create_pipeline(
        &self,
        id: &str,
        stages: Vec<NamedStage>,
        source: &Locale,
        target: &Locale,
    ) -> Result<Box<dyn ProcessingPipeline>, ConfigError> {
        match self.components.get(id) {
            Some(Component::Pipeline(constructor)) => constructor(stages, source, target),
            Some(Component::Processor(_)) => Err(ConfigError::ConstructorMismatch {
                class: id.to_string(),
                expected: "pipeline",
            }),
            None => Err(ConfigError::UnknownPipeline(id.to_string())),
        }
    }
}
