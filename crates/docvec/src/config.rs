//! Configuration for the ingestion pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IngestConfig {
    /// Blob store configuration
    #[serde(default)]
    pub blob: BlobStoreConfig,
    /// Embedding provider configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Vector index configuration
    #[serde(default)]
    pub index: IndexConfig,
    /// Batch upsert configuration
    #[serde(default)]
    pub upsert: UpsertConfig,
}

/// Blob store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobStoreConfig {
    /// Bucket holding uploaded documents
    #[serde(default)]
    pub bucket: String,
    /// Local directory for per-run scratch downloads
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            scratch_dir: default_scratch_dir(),
        }
    }
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Base URL of the embeddings API
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// API key for the embedding provider
    #[serde(default)]
    pub api_key: String,
    /// Embedding model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Input size ceiling; longer inputs are truncated before submission
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
    /// Dimensionality of the vectors the model produces
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: String::new(),
            model: default_model(),
            max_input_chars: default_max_input_chars(),
            dimensions: default_dimensions(),
        }
    }
}

/// Chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Overlap carried between adjacent chunks, in bytes
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    /// Byte cap for the per-chunk page text preview
    #[serde(default = "default_preview_bytes")]
    pub preview_bytes: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            preview_bytes: default_preview_bytes(),
        }
    }
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IndexConfig {
    /// Index host URL (data-plane endpoint)
    #[serde(default)]
    pub host: String,
    /// API key for the index service
    #[serde(default)]
    pub api_key: String,
}

/// Batch upsert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertConfig {
    /// Maximum records per upsert call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Attempts per batch before the run is aborted
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for UpsertConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from("tmp")
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_max_input_chars() -> usize {
    8191
}

fn default_dimensions() -> usize {
    1536
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_preview_bytes() -> usize {
    36_000
}

fn default_batch_size() -> usize {
    50
}

fn default_max_attempts() -> usize {
    3
}
