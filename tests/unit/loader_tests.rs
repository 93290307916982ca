/*!
 * Tests for pipeline descriptor loading and schema validation
 */

use std::io::{self, Read};

use textpipe::errors::ConfigError;
use textpipe::processing::{PipelineDescriptor, ProcessorDescriptor, StageDescriptor, load_descriptor};

use crate::common::{create_temp_dir, create_test_file};

const FULL_DESCRIPTOR: &str = r#"{
    "pipeline": "timed",
    "processors": [
        { "processor": " a " },
        { "processor": "b", "source": "zh" },
        { "processorGroup": [
            { "processor": "c", "target": "en it" },
            { "processor": "d" }
        ] },
        { "processor": "e", "source": "en", "target": "zh-TW,zh-HK" }
    ]
}"#;

#[test]
fn test_fromStr_withFullDescriptor_shouldKeepDeclarationOrder() {
    let descriptor: PipelineDescriptor = FULL_DESCRIPTOR.parse().unwrap();

    assert_eq!(descriptor.implementation(), Some("timed"));
    assert_eq!(descriptor.stages().len(), 4);

    let classes: Vec<&str> = descriptor.processors().map(|p| p.class()).collect();
    assert_eq!(classes, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_fromStr_withFilters_shouldSelectVariants() {
    let descriptor: PipelineDescriptor = FULL_DESCRIPTOR.parse().unwrap();
    let stages = descriptor.stages();

    assert!(matches!(stages[0], StageDescriptor::Processor(ProcessorDescriptor::Single { .. })));
    assert!(matches!(
        stages[1],
        StageDescriptor::Processor(ProcessorDescriptor::Filtered { source: Some(_), target: None, .. })
    ));

    match &stages[2] {
        StageDescriptor::Group(members) => {
            assert_eq!(members.len(), 2);
            assert!(matches!(members[0], ProcessorDescriptor::Filtered { source: None, target: Some(_), .. }));
            assert!(matches!(members[1], ProcessorDescriptor::Single { .. }));
        }
        other => panic!("expected a group, got {:?}", other),
    }

    match &stages[3] {
        StageDescriptor::Processor(ProcessorDescriptor::Filtered { target: Some(target), .. }) => {
            assert_eq!(target.locales().len(), 2);
        }
        other => panic!("expected a filtered processor, got {:?}", other),
    }
}

#[test]
fn test_fromStr_withoutImplementation_shouldUseNone() {
    let descriptor: PipelineDescriptor = r#"{"processors": []}"#.parse().unwrap();
    assert_eq!(descriptor.implementation(), None);
    assert!(descriptor.stages().is_empty());
}

#[test]
fn test_fromStr_withInvalidJson_shouldFailMalformed() {
    let result = r#"{"processors": [ {"processor": "a"} "#.parse::<PipelineDescriptor>();
    assert!(matches!(result, Err(ConfigError::Malformed(_))));
}

#[test]
fn test_fromStr_withMissingProcessors_shouldFailSchema() {
    let result = r#"{"pipeline": "sequential"}"#.parse::<PipelineDescriptor>();
    assert!(matches!(result, Err(ConfigError::Schema { .. })));
}

#[test]
fn test_fromStr_withEmptyClassReference_shouldFailSchema() {
    for json in [
        r#"{"processors": [{"processor": ""}]}"#,
        r#"{"processors": [{"processor": "   "}]}"#,
        r#"{"processors": [{"processor": null}]}"#,
        r#"{"processors": [{"source": "zh"}]}"#,
    ] {
        let result = json.parse::<PipelineDescriptor>();
        assert!(matches!(result, Err(ConfigError::Schema { .. })), "accepted {}", json);
    }
}

#[test]
fn test_fromStr_withBlankFilter_shouldFailSchema() {
    let result = r#"{"processors": [{"processor": "a", "target": " "}]}"#.parse::<PipelineDescriptor>();
    assert!(matches!(result, Err(ConfigError::Schema { ref path, .. }) if path == "processors[0].target"));
}

#[test]
fn test_fromStr_withUnknownElementKind_shouldFail() {
    let result = r#"{"processors": [{"tokenizer": "a"}]}"#.parse::<PipelineDescriptor>();
    match result {
        Err(ConfigError::UnknownElement { path, element }) => {
            assert_eq!(path, "processors[0]");
            assert_eq!(element, "tokenizer");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_fromStr_withNonProcessorGroupChild_shouldFail() {
    let nested = r#"{"processors": [{"processorGroup": [{"processorGroup": [{"processor": "a"}]}]}]}"#;
    assert!(matches!(nested.parse::<PipelineDescriptor>(), Err(ConfigError::Schema { .. })));

    let unknown = r#"{"processors": [{"processorGroup": [{"filter": "a"}]}]}"#;
    assert!(matches!(unknown.parse::<PipelineDescriptor>(), Err(ConfigError::UnknownElement { .. })));

    let scalar = r#"{"processors": [{"processorGroup": ["a"]}]}"#;
    assert!(matches!(scalar.parse::<PipelineDescriptor>(), Err(ConfigError::Schema { .. })));
}

#[test]
fn test_fromStr_withEmptyGroup_shouldFailSchema() {
    let result = r#"{"processors": [{"processorGroup": []}]}"#.parse::<PipelineDescriptor>();
    assert!(matches!(result, Err(ConfigError::Schema { .. })));
}

#[test]
fn test_fromStr_withInvalidFilterLanguage_shouldFailWithPath() {
    let json = r#"{"processors": [{"processorGroup": [{"processor": "a", "source": "en qq"}]}]}"#;
    match json.parse::<PipelineDescriptor>() {
        Err(ConfigError::InvalidLanguage { path, tag }) => {
            assert_eq!(path, "processors[0].processorGroup[0].source");
            assert_eq!(tag, "en qq");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_fromStr_withUnexpectedRootAttribute_shouldFailSchema() {
    let result = r#"{"class": "x", "processors": []}"#.parse::<PipelineDescriptor>();
    assert!(matches!(result, Err(ConfigError::Schema { .. })));
}

#[test]
fn test_loadDescriptor_withFile_shouldLoad() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "pipeline.json", FULL_DESCRIPTOR).unwrap();

    let descriptor = load_descriptor(&path).unwrap();
    assert_eq!(descriptor.processors().count(), 5);
}

#[test]
fn test_loadDescriptor_withMissingFile_shouldFailIo() {
    let dir = create_temp_dir().unwrap();
    let result = load_descriptor(dir.path().join("missing.json"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

/// Reader that fails after yielding part of the document
struct BrokenReader {
    served: usize,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk: &[u8] = br#"{"processors": ["#;
        if self.served >= chunk.len() {
            return Err(io::Error::other("disk went away"));
        }
        let n = buf.len().min(chunk.len() - self.served);
        buf[..n].copy_from_slice(&chunk[self.served..self.served + n]);
        self.served += n;
        Ok(n)
    }
}

#[test]
fn test_fromReader_withFailingReader_shouldFailWithoutDescriptor() {
    let result = PipelineDescriptor::from_reader(BrokenReader { served: 0 });
    assert!(matches!(result, Err(ConfigError::Malformed(_))));
}
