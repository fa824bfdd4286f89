//! Blob store provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for fetching raw document bytes from an object store
#[async_trait]
pub trait BlobStoreProvider: Send + Sync {
    /// Retrieve the object stored under `key`.
    ///
    /// Returns [`crate::Error::BlobNotFound`] when the object does not
    /// exist and [`crate::Error::BlobTransfer`] when the body cannot be
    /// read.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
