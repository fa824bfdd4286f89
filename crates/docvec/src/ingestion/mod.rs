//! Document ingestion: blob fetching, parsing, and chunking

mod chunker;
mod fetcher;
mod parser;

pub use chunker::RecursiveChunker;
pub use fetcher::{BlobFetcher, ScratchFile};
pub use parser::DocumentParser;
