//! Pinecone-style vector index client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::providers::vector_index::VectorIndexProvider;
use crate::types::{ChunkMetadata, EmbeddedChunk};

/// REST client for a Pinecone-style namespaced vector index
#[derive(Debug)]
pub struct PineconeIndex {
    client: reqwest::Client,
    host: String,
    api_key: String,
}

impl PineconeIndex {
    /// Create a new index client from configuration
    pub fn new(config: &IndexConfig) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(Error::config("vector index host is not set"));
        }
        if config.api_key.trim().is_empty() {
            return Err(Error::config("vector index API key is not set"));
        }

        Ok(Self {
            client: reqwest::Client::builder().build()?,
            host: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<VectorRecord<'a>>,
    namespace: &'a str,
}

#[derive(Serialize)]
struct VectorRecord<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: &'a ChunkMetadata,
}

#[derive(Deserialize, Default)]
struct UpsertResponse {
    #[serde(rename = "upsertedCount", default)]
    upserted_count: u64,
}

#[async_trait]
impl VectorIndexProvider for PineconeIndex {
    async fn upsert(&self, namespace: &str, records: &[EmbeddedChunk]) -> Result<()> {
        let request = UpsertRequest {
            vectors: records
                .iter()
                .map(|record| VectorRecord {
                    id: &record.id,
                    values: &record.vector,
                    metadata: &record.metadata,
                })
                .collect(),
            namespace,
        };

        let response = self
            .client
            .post(format!("{}/vectors/upsert", self.host))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::index_write(format!("upsert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::index_write(format!(
                "upsert failed ({}): {}",
                status, body
            )));
        }

        let ack: UpsertResponse = response.json().await.unwrap_or_default();
        tracing::debug!(
            "upserted {} vectors into namespace {:?}",
            ack.upserted_count,
            namespace
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}
