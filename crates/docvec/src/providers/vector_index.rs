//! Vector index provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::EmbeddedChunk;

/// Trait for writing embedded records into a namespaced vector index.
///
/// An upsert is insert-or-overwrite keyed by record ID; all records in one
/// call land in the same namespace.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Write `records` into `namespace`, overwriting records with matching
    /// IDs.
    async fn upsert(&self, namespace: &str, records: &[EmbeddedChunk]) -> Result<()>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
