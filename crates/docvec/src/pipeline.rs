//! Ingestion pipeline orchestration

use futures::future::try_join_all;
use std::sync::Arc;

use crate::config::IngestConfig;
use crate::error::Result;
use crate::identity;
use crate::ingestion::{BlobFetcher, DocumentParser, RecursiveChunker};
use crate::namespace;
use crate::providers::{
    BlobStoreProvider, EmbeddingProvider, GcsBlobStore, OpenAiEmbedder, PineconeIndex,
    VectorIndexProvider,
};
use crate::types::{Chunk, ChunkMetadata, EmbeddedChunk, Page};
use crate::upsert::BatchUpserter;

/// End-to-end ingestion: blob key in, namespaced vectors out.
///
/// Stages run `Fetching -> Parsing -> Chunking -> Embedding -> Upserting`;
/// any stage failure aborts the run and propagates the originating error.
/// Embedding and upserting fan out concurrently and stop in-flight siblings
/// on the first failure.
pub struct IngestPipeline {
    fetcher: BlobFetcher,
    chunker: RecursiveChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    upserter: BatchUpserter,
}

impl IngestPipeline {
    /// Create a pipeline over explicitly constructed providers
    pub fn new(
        config: &IngestConfig,
        blob_store: Arc<dyn BlobStoreProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
    ) -> Self {
        Self {
            fetcher: BlobFetcher::new(blob_store, config.blob.scratch_dir.clone()),
            chunker: RecursiveChunker::new(&config.chunking),
            embedder,
            upserter: BatchUpserter::new(index, &config.upsert),
        }
    }

    /// Assemble a pipeline with the default providers (GCS blob store,
    /// OpenAI embeddings, Pinecone-style index).
    pub async fn from_config(config: &IngestConfig) -> Result<Self> {
        let blob_store: Arc<dyn BlobStoreProvider> =
            Arc::new(GcsBlobStore::new(config.blob.bucket.clone()).await?);
        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OpenAiEmbedder::new(&config.embedding)?);
        let index: Arc<dyn VectorIndexProvider> = Arc::new(PineconeIndex::new(&config.index)?);

        Ok(Self::new(config, blob_store, embedder, index))
    }

    /// Ingest the document stored under `file_key`.
    ///
    /// Returns the first page's chunk list as the completion artifact.
    /// `file_name` is the human-readable display name and is used for
    /// logging only.
    pub async fn ingest(&self, file_key: &str, file_name: &str) -> Result<Vec<Chunk>> {
        tracing::info!("ingesting {:?} (key {:?})", file_name, file_key);

        // Derivable as soon as the key is known, independent of the stages
        let namespace = namespace::resolve(file_key);

        let scratch = self.fetcher.fetch(file_key).await?;
        let pages = DocumentParser::parse(scratch.path())?;
        // Parsed; release the scratch file before the network-bound stages
        drop(scratch);
        tracing::info!("parsed {} pages from {:?}", pages.len(), file_name);

        self.process_pages(&namespace, &pages).await
    }

    /// Chunk, embed, and upsert parsed pages into `namespace`
    async fn process_pages(&self, namespace: &str, pages: &[Page]) -> Result<Vec<Chunk>> {
        let chunks: Vec<Chunk> = pages
            .iter()
            .flat_map(|page| self.chunker.split(page))
            .collect();
        tracing::info!("split {} pages into {} chunks", pages.len(), chunks.len());

        let records = try_join_all(chunks.iter().map(|chunk| self.embed_chunk(chunk))).await?;
        tracing::info!("embedded {} chunks", records.len());

        self.upserter.upsert_all(namespace, &records).await?;

        let first_page = pages.iter().map(|p| p.page_number).min().unwrap_or(1);
        Ok(chunks
            .into_iter()
            .filter(|chunk| chunk.page_number == first_page)
            .collect())
    }

    /// Hash and embed one chunk; hashing is synchronous alongside the
    /// provider call.
    async fn embed_chunk(&self, chunk: &Chunk) -> Result<EmbeddedChunk> {
        let id = identity::content_id(&chunk.text);
        let vector = self.embedder.embed(&chunk.text).await?;

        Ok(EmbeddedChunk {
            id,
            vector,
            metadata: ChunkMetadata {
                page_number: chunk.page_number,
                text: chunk.preview_text.clone(),
            },
        })
    }
}
