/*!
 * Conversion resource caching.
 *
 * Conversion resources are expensive to build and there are only a handful
 * of variant pairs, so one cache is owned by the hosting component and
 * shared (through `Arc`) by every preprocessor it creates. Each pair is
 * loaded at most once: concurrent first users of a pair wait for the one
 * load in flight and then observe the same complete resource.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::errors::ProcessingError;

use super::converter::{ChineseConverter, ConverterLoader};
use super::variant::VariantPair;

type Slot = Arc<OnceCell<Arc<dyn ChineseConverter>>>;

/// Lazily populated map from variant pair to conversion resource
pub struct ConversionCache {
    loader: Arc<dyn ConverterLoader>,
    slots: Mutex<HashMap<VariantPair, Slot>>,
    loads: AtomicUsize,
}

impl ConversionCache {
    /// Create an empty cache that builds resources with `loader`
    pub fn new(loader: Arc<dyn ConverterLoader>) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Get the resource for `pair`, loading it on first use.
    ///
    /// The map lock is only held to find the pair's slot; loading happens
    /// outside it so unrelated pairs never wait on each other. A failed
    /// load leaves the slot empty.
    pub fn get_or_load(&self, pair: VariantPair) -> Result<Arc<dyn ChineseConverter>, ProcessingError> {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(pair).or_default())
        };

        slot.get_or_try_init(|| {
            self.loads.fetch_add(1, Ordering::SeqCst);
            debug!("Loading conversion resource {}", pair);
            self.loader.load(pair)
        })
        .map(Arc::clone)
    }

    /// The resource for `pair` if it has already been loaded
    pub fn get(&self, pair: VariantPair) -> Option<Arc<dyn ChineseConverter>> {
        let slots = self.slots.lock();
        slots.get(&pair).and_then(|slot| slot.get().cloned())
    }

    /// Number of pairs with a loaded resource
    pub fn len(&self) -> usize {
        self.slots.lock().values().filter(|slot| slot.get().is_some()).count()
    }

    /// Whether no resource has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times the loader has been invoked
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for ConversionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionCache")
            .field("loaded", &self.len())
            .field("loads", &self.loads())
            .finish()
    }
}
