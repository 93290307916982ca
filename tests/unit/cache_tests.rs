/*!
 * Tests for the conversion cache and the Chinese preprocessor
 */

use std::sync::atomic::Ordering;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use textpipe::processing::chinese::preprocessor::{DEFAULT_INTERNAL_VARIANT, VARIANT_KEY};
use textpipe::processing::chinese::{ChinesePreprocessor, ChineseVariant, ConversionCache, VariantPair};
use textpipe::{Metadata, SentenceBuilder, TextProcessor};

use crate::common::{CountingLoader, locale};

#[test]
fn test_cache_getOrLoad_withConcurrentFirstUse_shouldLoadOnce() {
    let (loader, loads) = CountingLoader::new(Duration::from_millis(50));
    let cache = Arc::new(ConversionCache::new(Arc::new(loader)));
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // half the threads ask for the pair in the opposite order
                let pair = if i % 2 == 0 {
                    VariantPair::new(ChineseVariant::Simplified, ChineseVariant::Taiwan)
                } else {
                    VariantPair::new(ChineseVariant::Taiwan, ChineseVariant::Simplified)
                };
                barrier.wait();
                cache.get_or_load(pair).unwrap()
            })
        })
        .collect();

    let converters: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.loads(), 1);
    for converter in &converters[1..] {
        assert!(Arc::ptr_eq(&converters[0], converter));
    }
}

#[test]
fn test_cache_getOrLoad_later_shouldReuseResource() {
    let (loader, loads) = CountingLoader::new(Duration::ZERO);
    let cache = ConversionCache::new(Arc::new(loader));
    let pair = VariantPair::new(ChineseVariant::HongKong, ChineseVariant::Taiwan);

    let first = cache.get_or_load(pair).unwrap();
    let second = cache.get_or_load(pair).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cache_getOrLoad_withDistinctPairs_shouldLoadEach() {
    let (loader, loads) = CountingLoader::new(Duration::ZERO);
    let cache = ConversionCache::new(Arc::new(loader));

    cache
        .get_or_load(VariantPair::new(ChineseVariant::Simplified, ChineseVariant::Taiwan))
        .unwrap();
    cache
        .get_or_load(VariantPair::new(ChineseVariant::HongKong, ChineseVariant::Taiwan))
        .unwrap();

    assert_eq!(loads.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_preprocessor_withInternalVariantInput_shouldPassThroughWithoutCache() {
    let (loader, loads) = CountingLoader::new(Duration::ZERO);
    let cache = Arc::new(ConversionCache::new(Arc::new(loader)));
    let processor =
        ChinesePreprocessor::new(&locale("zh-TW"), &locale("en"), DEFAULT_INTERNAL_VARIANT, Arc::clone(&cache))
            .unwrap();

    let mut metadata = Metadata::new();
    let input = SentenceBuilder::new("臺北市");
    let output = processor.call(input.clone(), &mut metadata).unwrap();

    assert_eq!(output, input);
    assert_eq!(metadata.get_str(VARIANT_KEY), Some("Taiwan"));
    assert_eq!(loads.load(Ordering::SeqCst), 0);
    assert!(cache.is_empty());
}

#[test]
fn test_preprocessor_withOtherVariant_shouldUseSharedCache() {
    let (loader, loads) = CountingLoader::new(Duration::ZERO);
    let cache = Arc::new(ConversionCache::new(Arc::new(loader)));

    let hong_kong =
        ChinesePreprocessor::new(&locale("zh-HK"), &locale("en"), ChineseVariant::Taiwan, Arc::clone(&cache)).unwrap();
    let another =
        ChinesePreprocessor::new(&locale("zh-HK"), &locale("it"), ChineseVariant::Taiwan, Arc::clone(&cache)).unwrap();

    let mut metadata = Metadata::new();
    hong_kong.call(SentenceBuilder::new("香港"), &mut metadata).unwrap();
    another.call(SentenceBuilder::new("香港"), &mut metadata).unwrap();

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(cache.get(VariantPair::new(ChineseVariant::Taiwan, ChineseVariant::HongKong)).is_some());
}

#[test]
fn test_preprocessor_new_withUnknownRegion_shouldFail() {
    let (loader, _) = CountingLoader::new(Duration::ZERO);
    let cache = Arc::new(ConversionCache::new(Arc::new(loader)));

    assert!(ChinesePreprocessor::new(&locale("zh-US"), &locale("en"), DEFAULT_INTERNAL_VARIANT, cache).is_err());
}
