/*!
 * End-to-end tests for the processing engine
 */

use std::sync::Arc;
use std::thread;

use textpipe::app_config::Config;
use textpipe::processing::chinese::{ChineseVariant, ConversionCache, MappingTableLoader};
use textpipe::{ComponentRegistry, PipelineDescriptor, PipelineError, ProcessingEngine};

use crate::common::{create_temp_dir, create_test_file, init_logging, locale};

fn engine_with_tables() -> ProcessingEngine {
    let loader = MappingTableLoader::new()
        .with_table(ChineseVariant::Simplified, ChineseVariant::Taiwan, [('汉', "漢"), ('语', "語")])
        .with_table(ChineseVariant::HongKong, ChineseVariant::Taiwan, [('着', "著")]);
    let cache = Arc::new(ConversionCache::new(Arc::new(loader)));
    let registry = ComponentRegistry::with_builtins(Arc::clone(&cache), ChineseVariant::Taiwan);

    ProcessingEngine::with_parts(PipelineDescriptor::builtin().unwrap(), registry, cache)
}

#[test]
fn test_engine_process_withSimplifiedInput_shouldNormalizeAndConvert() {
    init_logging();
    let engine = engine_with_tables();

    let output = engine.process(&locale("zh-CN"), &locale("en"), "  汉语   课 ").unwrap();
    assert_eq!(output, "漢語 课");

    let output = engine.process(&locale("en"), &locale("zh-CN"), "  plain   text ").unwrap();
    assert_eq!(output, "plain text");
}

#[test]
fn test_engine_process_withTaiwanInput_shouldNotTouchCache() {
    let engine = engine_with_tables();

    let output = engine.process(&locale("zh-TW"), &locale("en"), "漢語").unwrap();
    assert_eq!(output, "漢語");
    assert_eq!(engine.conversion_cache().loads(), 0);
}

#[test]
fn test_engine_pipeline_shouldMemoizePerLocalePair() {
    let engine = engine_with_tables();

    let first = engine.pipeline(&locale("zh-CN"), &locale("en")).unwrap();
    let second = engine.pipeline(&locale("zh-CN"), &locale("en")).unwrap();
    let other = engine.pipeline(&locale("en"), &locale("zh-CN")).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(engine.cached_pipelines(), 2);
}

#[test]
fn test_engine_pipeline_withUnsupportedChineseRegion_shouldFailAtBuild() {
    let engine = engine_with_tables();

    let error = engine.pipeline(&locale("zh-US"), &locale("en")).err().unwrap();
    assert!(matches!(error, PipelineError::UnsupportedStage { .. }));
    assert_eq!(engine.cached_pipelines(), 0);
}

#[test]
fn test_engine_pipeline_withConcurrentCallers_shouldShareConversions() {
    let engine = Arc::new(engine_with_tables());
    let pipeline = engine.pipeline(&locale("zh-CN"), &locale("en")).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || pipeline.process_text("汉语").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "漢語");
    }
    assert_eq!(engine.conversion_cache().loads(), 1);
}

#[test]
fn test_engine_new_withDescriptorFile_shouldUseIt() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        dir.path(),
        "pipeline.json",
        r#"{"pipeline": "timed", "processors": [{"processor": "whitespace_normalizer", "target": "it"}]}"#,
    )
    .unwrap();

    let config = Config {
        pipeline_file: Some(path),
        ..Config::default()
    };
    let engine = ProcessingEngine::new(&config).unwrap();

    assert_eq!(engine.descriptor().implementation(), Some("timed"));
    assert_eq!(engine.process(&locale("en"), &locale("it"), " a  b ").unwrap(), "a b");
    assert_eq!(engine.process(&locale("en"), &locale("de"), " a  b ").unwrap(), " a  b ");
}

#[test]
fn test_engine_new_withInvalidDescriptorFile_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "pipeline.json", r#"{"processors": [{"processor": ""}]}"#).unwrap();

    let config = Config {
        pipeline_file: Some(path),
        ..Config::default()
    };
    assert!(ProcessingEngine::new(&config).is_err());
}
