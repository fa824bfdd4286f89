//! Recursive text chunking with page metadata and overlap

use unicode_segmentation::UnicodeSegmentation;

use crate::config::ChunkingConfig;
use crate::types::{truncate_to_bytes, Chunk, Page};

/// Separator priorities tried before falling back to word and character
/// boundaries: paragraph, line, sentence.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". "];

/// Splits page text into bounded-size chunks with configurable overlap.
///
/// Separators are tried in descending priority; each level keeps its
/// separator attached to the preceding segment, so concatenating the
/// resulting chunks (minus the carried overlap) reconstructs the cleaned
/// page text exactly.
pub struct RecursiveChunker {
    /// Target chunk size in bytes
    chunk_size: usize,
    /// Overlap carried from the previous chunk
    chunk_overlap: usize,
    /// Byte cap for the page text preview attached to every chunk
    preview_bytes: usize,
}

impl RecursiveChunker {
    /// Create a chunker from configuration
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
            chunk_overlap: config.chunk_overlap,
            preview_bytes: config.preview_bytes,
        }
    }

    /// Split one page into chunks carrying its page number and a
    /// byte-capped preview of the whole cleaned page text.
    ///
    /// An empty page yields zero chunks.
    pub fn split(&self, page: &Page) -> Vec<Chunk> {
        let cleaned = clean_page_text(&page.text);
        if cleaned.is_empty() {
            return Vec::new();
        }

        let preview = truncate_to_bytes(&cleaned, self.preview_bytes).to_string();
        let pieces = self.split_recursive(&cleaned, SEPARATORS);

        self.merge_pieces(pieces)
            .into_iter()
            .map(|text| Chunk {
                page_number: page.page_number,
                text,
                preview_text: preview.clone(),
            })
            .collect()
    }

    /// Cut text into pieces at or below the target size, preferring the
    /// largest separator that produces fitting segments.
    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        match separators.split_first() {
            Some((separator, rest)) => {
                let parts: Vec<&str> = text.split_inclusive(separator).collect();
                if parts.len() <= 1 {
                    return self.split_recursive(text, rest);
                }
                parts
                    .into_iter()
                    .flat_map(|part| {
                        if part.len() <= self.chunk_size {
                            vec![part.to_string()]
                        } else {
                            self.split_recursive(part, rest)
                        }
                    })
                    .collect()
            }
            None => {
                // Word boundaries, then raw characters for oversized words
                let words: Vec<&str> = text.split_word_bounds().collect();
                if words.len() <= 1 {
                    return split_chars(text, self.chunk_size);
                }
                words
                    .into_iter()
                    .flat_map(|word| {
                        if word.len() <= self.chunk_size {
                            vec![word.to_string()]
                        } else {
                            split_chars(word, self.chunk_size)
                        }
                    })
                    .collect()
            }
        }
    }

    /// Greedily merge adjacent pieces up to the target size, carrying an
    /// overlap tail from each emitted chunk into the next.
    fn merge_pieces(&self, pieces: Vec<String>) -> Vec<String> {
        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();
        // Bytes of `current` that are carried overlap, not fresh text
        let mut carried = 0usize;

        for piece in pieces {
            let fits = current.len() + piece.len() <= self.chunk_size;
            if !fits && current.len() > carried {
                let tail = self.overlap_tail(&current);
                chunks.push(current);
                carried = tail.len();
                current = tail;
            }
            current.push_str(&piece);
        }

        if current.len() > carried {
            chunks.push(current);
        }

        chunks
    }

    /// Tail of an emitted chunk carried into the next one, backed off to a
    /// character boundary.
    fn overlap_tail(&self, text: &str) -> String {
        if self.chunk_overlap == 0 {
            return String::new();
        }
        if text.len() <= self.chunk_overlap {
            return text.to_string();
        }
        let mut start = text.len() - self.chunk_overlap;
        while start > 0 && !text.is_char_boundary(start) {
            start -= 1;
        }
        text[start..].to_string()
    }
}

/// Strip newline characters from page text before splitting; ragged
/// mid-sentence line breaks would otherwise read as paragraph boundaries.
fn clean_page_text(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Cut text into pieces of at most `max` bytes on character boundaries.
fn split_chars(text: &str, max: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = text;
    while rest.len() > max {
        let mut cut = max;
        while cut > 0 && !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            // A single character wider than the cap; emit it whole
            cut = rest.chars().next().map(char::len_utf8).unwrap_or(rest.len());
        }
        out.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    if !rest.is_empty() {
        out.push(rest.to_string());
    }
    out
}
