/*!
 * The stage contract.
 */

use crate::errors::ProcessingError;

use super::metadata::Metadata;
use super::sentence::SentenceBuilder;

/// One unit of text transformation composed into a pipeline.
///
/// Stages are constructed for a fixed (source, target) locale pair by the
/// registry and must be shareable across threads: a built pipeline may be
/// invoked concurrently, so `call` takes `&self` and any state touched
/// during a call must be internally synchronized.
pub trait TextProcessor: Send + Sync {
    /// Transform `input`, reading and writing `metadata` as needed
    fn call(&self, input: SentenceBuilder, metadata: &mut Metadata) -> Result<SentenceBuilder, ProcessingError>;
}
