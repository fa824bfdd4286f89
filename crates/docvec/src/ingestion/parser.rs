//! PDF document parsing into ordered pages

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Page;

/// Adapts the PDF library's output into ordered, 1-based [`Page`]s.
///
/// Binary format handling is fully delegated to `pdf-extract`; this type only
/// validates the file and shapes the per-page text.
pub struct DocumentParser;

impl DocumentParser {
    /// Parse the document at `path` into its pages
    pub fn parse(path: &Path) -> Result<Vec<Page>> {
        let data = std::fs::read(path)?;
        Self::parse_bytes(&data)
    }

    /// Parse raw document bytes into pages
    pub fn parse_bytes(data: &[u8]) -> Result<Vec<Page>> {
        // Validate structure first; pdf-extract's errors for garbage input
        // are less precise than lopdf's.
        lopdf::Document::load_mem(data)
            .map_err(|e| Error::parse(format!("not a well-formed PDF: {}", e)))?;

        let page_texts = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::parse(format!("text extraction failed: {}", e)))?;

        if page_texts.is_empty() {
            return Err(Error::parse("document contains no pages"));
        }

        let pages: Vec<Page> = page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page {
                page_number: i as u32 + 1,
                text,
            })
            .collect();

        if pages.iter().all(|p| p.text.trim().is_empty()) {
            return Err(Error::parse(
                "no extractable text in document; it may be image-based",
            ));
        }

        tracing::debug!("extracted {} pages", pages.len());
        Ok(pages)
    }
}
