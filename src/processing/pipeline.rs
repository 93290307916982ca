/*!
 * Executable pipelines.
 *
 * A pipeline is an ordered, immutable list of stages built for one
 * (source, target) locale pair. Stages run strictly in order; the first
 * failure aborts the remaining stages for that call only.
 */

use std::fmt;
use std::time::Instant;

use log::{debug, warn};
use serde_json::{Value, json};

use crate::errors::ProcessingError;
use crate::language_utils::Locale;

use super::metadata::Metadata;
use super::processor::TextProcessor;
use super::sentence::SentenceBuilder;

/// Metadata key under which `TimedPipeline` records stage timings
pub const TIMINGS_KEY: &str = "pipeline.timings";

/// An instantiated stage together with the class reference it was built from
pub struct NamedStage {
    class: String,
    processor: Box<dyn TextProcessor>,
}

impl NamedStage {
    /// Pair a stage with its class reference
    pub fn new(class: &str, processor: Box<dyn TextProcessor>) -> Self {
        Self {
            class: class.to_string(),
            processor,
        }
    }

    /// Class reference of the stage
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Run the stage at `position`, attaching the position to any failure
    fn run(
        &self,
        position: usize,
        input: SentenceBuilder,
        metadata: &mut Metadata,
    ) -> Result<SentenceBuilder, ProcessingError> {
        self.processor
            .call(input, metadata)
            .map_err(|error| ProcessingError::StageFailed {
                position,
                stage: self.class.clone(),
                message: error.to_string(),
            })
    }
}

impl fmt::Debug for NamedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedStage").field("class", &self.class).finish()
    }
}

/// The single execution entry point shared by every pipeline implementation
pub trait ProcessingPipeline: Send + Sync {
    /// Thread `input` through every stage in order
    fn process(&self, input: SentenceBuilder, metadata: &mut Metadata) -> Result<SentenceBuilder, ProcessingError>;

    /// Stages in execution order
    fn stages(&self) -> &[NamedStage];

    /// Source locale the pipeline was built for
    fn source(&self) -> &Locale;

    /// Target locale the pipeline was built for
    fn target(&self) -> &Locale;

    /// Class references of the stages in execution order
    fn stage_names(&self) -> Vec<&str> {
        self.stages().iter().map(NamedStage::class).collect()
    }

    /// Number of stages
    fn len(&self) -> usize {
        self.stages().len()
    }

    /// Whether the pipeline has no stages
    fn is_empty(&self) -> bool {
        self.stages().is_empty()
    }

    /// Process plain text with fresh metadata
    fn process_text(&self, text: &str) -> Result<String, ProcessingError> {
        let mut metadata = Metadata::new();
        self.process(SentenceBuilder::new(text), &mut metadata)
            .map(SentenceBuilder::into_string)
    }
}

/// Default pipeline: runs the stages one after the other
#[derive(Debug)]
pub struct SequentialPipeline {
    stages: Vec<NamedStage>,
    source: Locale,
    target: Locale,
}

impl SequentialPipeline {
    /// Create a pipeline from assembled stages
    pub fn new(stages: Vec<NamedStage>, source: &Locale, target: &Locale) -> Self {
        Self {
            stages,
            source: source.clone(),
            target: target.clone(),
        }
    }
}

impl ProcessingPipeline for SequentialPipeline {
    fn process(&self, input: SentenceBuilder, metadata: &mut Metadata) -> Result<SentenceBuilder, ProcessingError> {
        self.stages
            .iter()
            .enumerate()
            .try_fold(input, |value, (position, stage)| stage.run(position, value, metadata))
    }

    fn stages(&self) -> &[NamedStage] {
        &self.stages
    }

    fn source(&self) -> &Locale {
        &self.source
    }

    fn target(&self) -> &Locale {
        &self.target
    }
}

/// Sequential pipeline that records how long each stage took.
///
/// Timings are appended to the `pipeline.timings` metadata entry as
/// `{"stage": <class>, "micros": <elapsed>}` objects.
#[derive(Debug)]
pub struct TimedPipeline {
    inner: SequentialPipeline,
}

impl TimedPipeline {
    /// Create a timed pipeline from assembled stages
    pub fn new(stages: Vec<NamedStage>, source: &Locale, target: &Locale) -> Self {
        Self {
            inner: SequentialPipeline::new(stages, source, target),
        }
    }
}

impl ProcessingPipeline for TimedPipeline {
    fn process(&self, input: SentenceBuilder, metadata: &mut Metadata) -> Result<SentenceBuilder, ProcessingError> {
        let mut value = input;

        for (position, stage) in self.inner.stages.iter().enumerate() {
            let started = Instant::now();
            value = stage.run(position, value, metadata)?;
            let micros = started.elapsed().as_micros() as u64;

            debug!("Stage #{} ({}) took {}µs", position, stage.class(), micros);

            let timings = metadata.entry_or_insert(TIMINGS_KEY, Value::Array(Vec::new()));
            if !timings.is_array() {
                warn!("Replacing non-array '{}' metadata with stage timings", TIMINGS_KEY);
                *timings = Value::Array(Vec::new());
            }
            if let Value::Array(entries) = timings {
                entries.push(json!({ "stage": stage.class(), "micros": micros }));
            }
        }

        Ok(value)
    }

    fn stages(&self) -> &[NamedStage] {
        self.inner.stages()
    }

    fn source(&self) -> &Locale {
        self.inner.source()
    }

    fn target(&self) -> &Locale {
        self.inner.target()
    }
}
