//! docvec: document-to-vector ingestion pipeline
//!
//! Fetches a previously stored document blob, extracts its pages, splits them
//! into bounded-size content-addressed chunks, embeds each chunk through a
//! remote provider, and upserts the embedded records into an isolated
//! namespace of a shared vector index in fixed-size, retried batches.
//!
//! All external collaborators (blob store, embedding provider, vector index)
//! sit behind provider traits and are injected into [`IngestPipeline`] at
//! construction; nothing in this crate holds process-wide state.

pub mod config;
pub mod error;
pub mod identity;
pub mod ingestion;
pub mod namespace;
pub mod pipeline;
pub mod providers;
pub mod types;
pub mod upsert;

pub use config::IngestConfig;
pub use error::{Error, Result};
pub use pipeline::IngestPipeline;
pub use types::{Chunk, ChunkMetadata, EmbeddedChunk, Page};
