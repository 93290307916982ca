/*!
 * Stage descriptors.
 *
 * A descriptor is the declarative, pre-instantiation form of a stage as
 * read from configuration. Descriptors decide whether they apply to a
 * locale pair (`accept`) and create the stage when they do (`create`).
 */

use std::fmt;

use anyhow::Result;

use crate::errors::PipelineError;
use crate::language_utils::Locale;

use super::pipeline::NamedStage;
use super::registry::ComponentRegistry;

/// A set of locales a filter attribute accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFilter {
    locales: Vec<Locale>,
}

impl LanguageFilter {
    /// Parse a whitespace- or comma-separated list of language tags
    pub fn parse(value: &str) -> Result<Self> {
        let locales = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|tag| !tag.is_empty())
            .map(Locale::parse)
            .collect::<Result<Vec<_>>>()?;

        if locales.is_empty() {
            return Err(anyhow::anyhow!("Empty language filter"));
        }

        Ok(Self { locales })
    }

    /// Create a filter from already parsed locales
    pub fn from_locales(locales: Vec<Locale>) -> Self {
        Self { locales }
    }

    /// Whether any listed locale matches `locale`
    pub fn matches(&self, locale: &Locale) -> bool {
        self.locales.iter().any(|candidate| candidate.matches(locale))
    }

    /// The listed locales in declaration order
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = self.locales.iter().map(Locale::to_language_tag).collect();
        write!(f, "{}", tags.join(" "))
    }
}

/// One `processor` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorDescriptor {
    /// Applies to every locale pair
    Single {
        /// Class reference resolved against the registry
        class: String,
    },
    /// Applies only when the declared filters match
    Filtered {
        /// Class reference resolved against the registry
        class: String,
        /// Filter on the source locale
        source: Option<LanguageFilter>,
        /// Filter on the target locale
        target: Option<LanguageFilter>,
    },
}

impl ProcessorDescriptor {
    /// Build a descriptor; the filtered variant is chosen when any filter is present
    pub fn new(class: &str, source: Option<LanguageFilter>, target: Option<LanguageFilter>) -> Self {
        let class = class.trim().to_string();
        if source.is_none() && target.is_none() {
            Self::Single { class }
        } else {
            Self::Filtered { class, source, target }
        }
    }

    /// Class reference of the stage
    pub fn class(&self) -> &str {
        match self {
            Self::Single { class } | Self::Filtered { class, .. } => class,
        }
    }

    /// Whether this stage applies to the locale pair
    pub fn accept(&self, source: &Locale, target: &Locale) -> bool {
        match self {
            Self::Single { .. } => true,
            Self::Filtered {
                source: source_filter,
                target: target_filter,
                ..
            } => {
                source_filter.as_ref().is_none_or(|filter| filter.matches(source))
                    && target_filter.as_ref().is_none_or(|filter| filter.matches(target))
            }
        }
    }

    /// Instantiate the stage for the locale pair
    pub fn create(
        &self,
        registry: &ComponentRegistry,
        source: &Locale,
        target: &Locale,
    ) -> Result<NamedStage, PipelineError> {
        let processor = registry.create_processor(self.class(), source, target)?;
        Ok(NamedStage::new(self.class(), processor))
    }
}

/// One entry of the pipeline's stage list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageDescriptor {
    /// A lone `processor` element
    Processor(ProcessorDescriptor),
    /// A `processorGroup`; members are filtered independently in place
    Group(Vec<ProcessorDescriptor>),
}

impl StageDescriptor {
    /// The processors this entry expands to, in declaration order
    pub fn processors(&self) -> &[ProcessorDescriptor] {
        match self {
            Self::Processor(processor) => std::slice::from_ref(processor),
            Self::Group(members) => members,
        }
    }

    /// Processors of this entry that apply to the locale pair, in declaration order
    pub fn accepted<'a>(
        &'a self,
        source: &'a Locale,
        target: &'a Locale,
    ) -> impl Iterator<Item = &'a ProcessorDescriptor> + 'a {
        self.processors()
            .iter()
            .filter(move |processor| processor.accept(source, target))
    }
}
