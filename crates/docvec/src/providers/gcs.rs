//! Google Cloud Storage blob store

use async_trait::async_trait;

use google_cloud_storage::client::{Client as GcsClient, ClientConfig};
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::Error as GcsError;

use crate::error::{Error, Result};
use crate::providers::blob_store::BlobStoreProvider;

/// Google Cloud Storage blob store
pub struct GcsBlobStore {
    client: GcsClient,
    bucket: String,
}

impl GcsBlobStore {
    /// Create a new GCS blob store for `bucket`.
    ///
    /// Credentials come from the environment (application default
    /// credentials); they are not part of this crate's configuration.
    pub async fn new(bucket: String) -> Result<Self> {
        let config = ClientConfig::default()
            .with_auth()
            .await
            .map_err(|e| Error::config(format!("failed to create GCS client: {}", e)))?;

        Ok(Self {
            client: GcsClient::new(config),
            bucket,
        })
    }
}

#[async_trait]
impl BlobStoreProvider for GcsBlobStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.client
            .download_object(
                &GetObjectRequest {
                    bucket: self.bucket.clone(),
                    object: key.to_string(),
                    ..Default::default()
                },
                &Range::default(),
            )
            .await
            .map_err(|e| match e {
                GcsError::Response(ref response) if response.code == 404 => {
                    Error::BlobNotFound(key.to_string())
                }
                other => Error::blob_transfer(format!(
                    "failed to download {:?} from bucket {:?}: {}",
                    key, self.bucket, other
                )),
            })
    }

    fn name(&self) -> &str {
        "gcs"
    }
}
