/*!
 * Pipeline descriptor loading.
 *
 * A descriptor document is a JSON object:
 *
 * ```json
 * {
 *   "pipeline": "sequential",
 *   "processors": [
 *     { "processor": "whitespace_normalizer" },
 *     { "processor": "chinese_preprocessor", "source": "zh" },
 *     { "processorGroup": [ { "processor": "a", "target": "en it" } ] }
 *   ]
 * }
 * ```
 *
 * Loading happens in two steps. The raw JSON tree is first checked against
 * the fixed structural schema; only a document that passes is interpreted
 * into descriptors (filters parsed as locales). Either step failing yields
 * a `ConfigError` and no descriptor.
 */

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::ConfigError;

use super::descriptor::{LanguageFilter, ProcessorDescriptor, StageDescriptor};

const PIPELINE_KEY: &str = "pipeline";
const PROCESSORS_KEY: &str = "processors";
const PROCESSOR_KEY: &str = "processor";
const GROUP_KEY: &str = "processorGroup";
const SOURCE_KEY: &str = "source";
const TARGET_KEY: &str = "target";

/// The descriptor shipped with the crate, used when no file is configured
pub const DEFAULT_DESCRIPTOR: &str = include_str!("default-pipeline.json");

/// Parsed pipeline configuration: an optional implementation and the ordered stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDescriptor {
    implementation: Option<String>,
    stages: Vec<StageDescriptor>,
}

impl PipelineDescriptor {
    /// Create a descriptor from already built parts
    pub fn new(implementation: Option<String>, stages: Vec<StageDescriptor>) -> Self {
        Self { implementation, stages }
    }

    /// The descriptor shipped with the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        DEFAULT_DESCRIPTOR.parse()
    }

    /// Load a descriptor from a file. The handle is released on every path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let descriptor = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded pipeline descriptor {} ({} entries)",
            path.display(),
            descriptor.stages.len()
        );
        Ok(descriptor)
    }

    /// Load a descriptor from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let document: Value =
            serde_json::from_reader(reader).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        Self::from_value(&document)
    }

    /// Validate and interpret an already parsed JSON document
    pub fn from_value(document: &Value) -> Result<Self, ConfigError> {
        validate_schema(document)?;

        let raw = RawPipeline::deserialize(document).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        let descriptor = raw.interpret()?;

        debug!(
            "Pipeline descriptor: implementation={:?}, {} entries",
            descriptor.implementation,
            descriptor.stages.len()
        );
        Ok(descriptor)
    }

    /// Identifier of the pipeline implementation, if one was configured
    pub fn implementation(&self) -> Option<&str> {
        self.implementation.as_deref()
    }

    /// Stage entries in declaration order
    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    /// Every processor, groups expanded, in declaration order
    pub fn processors(&self) -> impl Iterator<Item = &ProcessorDescriptor> {
        self.stages.iter().flat_map(StageDescriptor::processors)
    }
}

impl FromStr for PipelineDescriptor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

/// Load a pipeline descriptor from a file
pub fn load_descriptor<P: AsRef<Path>>(path: P) -> Result<PipelineDescriptor, ConfigError> {
    PipelineDescriptor::load_from_file(path)
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPipeline {
    #[serde(default)]
    pipeline: Option<String>,
    processors: Vec<RawElement>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawElement {
    Processor(RawProcessor),
    Group(RawGroup),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProcessor {
    processor: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    target: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGroup {
    #[serde(rename = "processorGroup")]
    members: Vec<RawProcessor>,
}

impl RawPipeline {
    fn interpret(self) -> Result<PipelineDescriptor, ConfigError> {
        let stages = self
            .processors
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                let path = format!("{}[{}]", PROCESSORS_KEY, index);
                match element {
                    RawElement::Processor(processor) => {
                        processor.interpret(&path).map(StageDescriptor::Processor)
                    }
                    RawElement::Group(group) => group
                        .members
                        .into_iter()
                        .enumerate()
                        .map(|(member, processor)| {
                            processor.interpret(&format!("{}.{}[{}]", path, GROUP_KEY, member))
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map(StageDescriptor::Group),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let implementation = self.pipeline.map(|id| id.trim().to_string());
        Ok(PipelineDescriptor::new(implementation, stages))
    }
}

impl RawProcessor {
    fn interpret(self, path: &str) -> Result<ProcessorDescriptor, ConfigError> {
        let source = parse_filter(self.source.as_deref(), &format!("{}.{}", path, SOURCE_KEY))?;
        let target = parse_filter(self.target.as_deref(), &format!("{}.{}", path, TARGET_KEY))?;
        Ok(ProcessorDescriptor::new(&self.processor, source, target))
    }
}

fn parse_filter(value: Option<&str>, path: &str) -> Result<Option<LanguageFilter>, ConfigError> {
    value
        .map(|tags| {
            LanguageFilter::parse(tags).map_err(|_| ConfigError::InvalidLanguage {
                path: path.to_string(),
                tag: tags.to_string(),
            })
        })
        .transpose()
}

fn schema_error(path: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Schema {
        path: path.to_string(),
        message: message.into(),
    }
}

/// Check the raw document against the descriptor schema; first error wins
fn validate_schema(document: &Value) -> Result<(), ConfigError> {
    let root = document
        .as_object()
        .ok_or_else(|| schema_error("$", "expected a pipeline object"))?;

    if let Some(key) = root.keys().find(|k| *k != PIPELINE_KEY && *k != PROCESSORS_KEY) {
        return Err(schema_error("$", format!("unexpected attribute '{}'", key)));
    }

    if let Some(implementation) = root.get(PIPELINE_KEY) {
        require_text(implementation, PIPELINE_KEY)?;
    }

    let processors = root
        .get(PROCESSORS_KEY)
        .ok_or_else(|| schema_error("$", format!("missing '{}'", PROCESSORS_KEY)))?
        .as_array()
        .ok_or_else(|| schema_error(PROCESSORS_KEY, "expected an array of elements"))?;

    for (index, element) in processors.iter().enumerate() {
        validate_element(element, &format!("{}[{}]", PROCESSORS_KEY, index))?;
    }

    Ok(())
}

fn validate_element(element: &Value, path: &str) -> Result<(), ConfigError> {
    let object = element
        .as_object()
        .ok_or_else(|| schema_error(path, "expected an element object"))?;

    let kinds: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| *key != SOURCE_KEY && *key != TARGET_KEY)
        .collect();

    match kinds.as_slice() {
        [PROCESSOR_KEY] => validate_processor(object, path),
        [GROUP_KEY] if object.len() == 1 => validate_group(&object[GROUP_KEY], &format!("{}.{}", path, GROUP_KEY)),
        [GROUP_KEY] => Err(schema_error(path, "'processorGroup' takes no attributes")),
        [] => Err(schema_error(path, "expected a 'processor' or 'processorGroup' element")),
        _ => match kinds.iter().find(|kind| **kind != PROCESSOR_KEY && **kind != GROUP_KEY) {
            Some(unknown) => Err(ConfigError::UnknownElement {
                path: path.to_string(),
                element: unknown.to_string(),
            }),
            None => Err(schema_error(path, "an element must be either 'processor' or 'processorGroup'")),
        },
    }
}

fn validate_group(members: &Value, path: &str) -> Result<(), ConfigError> {
    let members = members
        .as_array()
        .ok_or_else(|| schema_error(path, "expected an array of 'processor' elements"))?;

    if members.is_empty() {
        return Err(schema_error(path, "a group needs at least one 'processor'"));
    }

    for (index, member) in members.iter().enumerate() {
        let member_path = format!("{}[{}]", path, index);
        let object = member
            .as_object()
            .ok_or_else(|| schema_error(&member_path, "expected a 'processor' element"))?;

        if object.contains_key(GROUP_KEY) {
            return Err(schema_error(&member_path, "groups cannot be nested"));
        }
        if !object.contains_key(PROCESSOR_KEY) {
            return match object.keys().find(|k| *k != SOURCE_KEY && *k != TARGET_KEY) {
                Some(unknown) => Err(ConfigError::UnknownElement {
                    path: member_path,
                    element: unknown.clone(),
                }),
                None => Err(schema_error(&member_path, "expected a 'processor' element")),
            };
        }

        validate_processor(object, &member_path)?;
    }

    Ok(())
}

fn validate_processor(object: &Map<String, Value>, path: &str) -> Result<(), ConfigError> {
    for (key, value) in object {
        match key.as_str() {
            PROCESSOR_KEY | SOURCE_KEY | TARGET_KEY => require_text(value, &format!("{}.{}", path, key))?,
            other => {
                return Err(schema_error(path, format!("unexpected attribute '{}'", other)));
            }
        }
    }
    Ok(())
}

fn require_text(value: &Value, path: &str) -> Result<(), ConfigError> {
    match value.as_str() {
        Some(text) if !text.trim().is_empty() => Ok(()),
        Some(_) => Err(schema_error(path, "expected non-empty text")),
        None => Err(schema_error(path, "expected a string")),
    }
}
