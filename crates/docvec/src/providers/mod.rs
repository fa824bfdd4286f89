//! Provider abstractions for blob storage, embeddings, and the vector index
//!
//! Trait-based boundaries so the pipeline owns explicitly constructed,
//! injected clients instead of process-wide singletons.

pub mod blob_store;
pub mod embedding;
pub mod gcs;
pub mod openai;
pub mod pinecone;
pub mod vector_index;

pub use blob_store::BlobStoreProvider;
pub use embedding::EmbeddingProvider;
pub use gcs::GcsBlobStore;
pub use openai::OpenAiEmbedder;
pub use pinecone::PineconeIndex;
pub use vector_index::VectorIndexProvider;
