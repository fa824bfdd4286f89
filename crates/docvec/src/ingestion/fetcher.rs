//! Blob download into a local scratch file

use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::providers::BlobStoreProvider;

/// A downloaded blob on local disk, removed when dropped.
///
/// One scratch file is owned exclusively by one pipeline run; deletion
/// happens on every exit path, success or failure.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Path of the downloaded file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::debug!("could not remove scratch file {:?}: {}", self.path, e);
        }
    }
}

/// Retrieves document blobs into a local scratch directory
pub struct BlobFetcher {
    store: Arc<dyn BlobStoreProvider>,
    scratch_dir: PathBuf,
}

impl BlobFetcher {
    /// Create a new fetcher writing into `scratch_dir`
    pub fn new(store: Arc<dyn BlobStoreProvider>, scratch_dir: PathBuf) -> Self {
        Self { store, scratch_dir }
    }

    /// Download the object at `key` to a freshly created, uniquely named
    /// scratch file.
    ///
    /// No retries happen here; transient transport failures are the
    /// transport's concern, and a missing or empty object aborts the run.
    pub async fn fetch(&self, key: &str) -> Result<ScratchFile> {
        if key.trim().is_empty() {
            return Err(Error::config("storage key must not be empty"));
        }

        tokio::fs::create_dir_all(&self.scratch_dir).await?;

        let data = self.store.get(key).await?;
        if data.is_empty() {
            return Err(Error::blob_transfer(format!(
                "object {:?} has an empty body",
                key
            )));
        }

        let extension = Path::new(key)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("pdf");
        let path = self
            .scratch_dir
            .join(format!("blob-{}.{}", Uuid::new_v4(), extension));

        tokio::fs::write(&path, &data).await?;
        tracing::info!(
            "downloaded {:?} ({} bytes) from {} to {:?}",
            key,
            data.len(),
            self.store.name(),
            path
        );

        Ok(ScratchFile { path })
    }
}
