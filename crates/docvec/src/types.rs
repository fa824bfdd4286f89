//! Page, chunk, and embedded record types

use serde::{Deserialize, Serialize};

/// A single page of extracted document text
///
/// Page numbers are 1-based and follow the physical order of the source
/// document; they are unique within one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Extracted text content of the page
    pub text: String,
}

/// A bounded-size slice of a page's text, the unit of embedding and indexing
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Page the chunk was cut from
    pub page_number: u32,
    /// Chunk text (pre-truncation; this is what gets hashed and embedded)
    pub text: String,
    /// Byte-capped preview of the whole cleaned page text
    pub preview_text: String,
}

/// Metadata attached to an indexed vector record
///
/// Closed struct instead of a free-form map: the index only accepts flat
/// scalar values, and this serializes to exactly `{"pageNumber", "text"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Page the underlying chunk was cut from
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
    /// Preview text stored alongside the vector for retrieval display
    pub text: String,
}

/// A chunk with its computed embedding, ready for upsert
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedChunk {
    /// Content-addressed record ID (hex digest of the chunk text)
    pub id: String,
    /// Fixed-length embedding vector
    pub vector: Vec<f32>,
    /// Flat scalar metadata stored with the record
    pub metadata: ChunkMetadata,
}

/// Truncate `text` to at most `max_bytes` bytes without splitting a
/// multi-byte code point.
pub fn truncate_to_bytes(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
