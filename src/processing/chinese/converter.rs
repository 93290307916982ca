/*!
 * Conversion resources between Chinese variants.
 *
 * A conversion resource serves both directions of one unordered variant
 * pair. Resources are created by a `ConverterLoader`, which is where the
 * expensive work (reading tables, building automata) belongs; the cache
 * makes sure each pair is loaded once.
 *
 * No linguistic tables ship with the crate. `MappingTableLoader` holds
 * whatever character tables the host registers and yields identity
 * conversion for directions it has no table for.
 */

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ProcessingError;

use super::variant::{ChineseVariant, VariantPair};

/// A reusable conversion resource for one variant pair
pub trait ChineseConverter: Send + Sync {
    /// The pair this resource converts between
    fn pair(&self) -> VariantPair;

    /// Convert `text` written in `from` into `to`
    fn convert(&self, text: &str, from: ChineseVariant, to: ChineseVariant) -> Result<String, ProcessingError>;
}

/// Creates conversion resources on demand
pub trait ConverterLoader: Send + Sync {
    /// Build the resource for `pair`
    fn load(&self, pair: VariantPair) -> Result<Arc<dyn ChineseConverter>, ProcessingError>;
}

type CharacterTable = HashMap<char, String>;

/// Table-driven converter: each character is looked up and replaced
#[derive(Debug, Clone)]
pub struct CharacterMapConverter {
    pair: VariantPair,
    forward: CharacterTable,
    backward: CharacterTable,
}

impl CharacterMapConverter {
    /// Create a converter; `forward` maps `pair.first()` to `pair.second()`
    pub fn new(pair: VariantPair, forward: CharacterTable, backward: CharacterTable) -> Self {
        Self { pair, forward, backward }
    }

    fn table_for(&self, from: ChineseVariant, to: ChineseVariant) -> Option<&CharacterTable> {
        if from == self.pair.first() && to == self.pair.second() {
            Some(&self.forward)
        } else if from == self.pair.second() && to == self.pair.first() {
            Some(&self.backward)
        } else {
            None
        }
    }
}

impl ChineseConverter for CharacterMapConverter {
    fn pair(&self) -> VariantPair {
        self.pair
    }

    fn convert(&self, text: &str, from: ChineseVariant, to: ChineseVariant) -> Result<String, ProcessingError> {
        if from == to {
            return Ok(text.to_string());
        }

        let table = self.table_for(from, to).ok_or_else(|| ProcessingError::Conversion {
            pair: self.pair.to_string(),
            message: format!("cannot convert {} to {}", from, to),
        })?;

        if table.is_empty() {
            return Ok(text.to_string());
        }

        let mut converted = String::with_capacity(text.len());
        for c in text.chars() {
            match table.get(&c) {
                Some(replacement) => converted.push_str(replacement),
                None => converted.push(c),
            }
        }
        Ok(converted)
    }
}

/// Loader backed by character tables registered per direction
#[derive(Debug, Clone, Default)]
pub struct MappingTableLoader {
    tables: HashMap<(ChineseVariant, ChineseVariant), CharacterTable>,
}

impl MappingTableLoader {
    /// Create a loader with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the table converting `from` into `to`
    pub fn with_table<'a, I>(mut self, from: ChineseVariant, to: ChineseVariant, entries: I) -> Self
    where
        I: IntoIterator<Item = (char, &'a str)>,
    {
        let table = self.tables.entry((from, to)).or_default();
        for (source, replacement) in entries {
            table.insert(source, replacement.to_string());
        }
        self
    }

    fn table(&self, from: ChineseVariant, to: ChineseVariant) -> CharacterTable {
        self.tables.get(&(from, to)).cloned().unwrap_or_default()
    }
}

impl ConverterLoader for MappingTableLoader {
    fn load(&self, pair: VariantPair) -> Result<Arc<dyn ChineseConverter>, ProcessingError> {
        let forward = self.table(pair.first(), pair.second());
        let backward = self.table(pair.second(), pair.first());
        Ok(Arc::new(CharacterMapConverter::new(pair, forward, backward)))
    }
}
