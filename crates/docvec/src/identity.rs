//! Content-addressed chunk identifiers

use sha2::{Digest, Sha256};

/// Derive the deterministic index ID for a chunk's text.
///
/// Hashes the full pre-truncation chunk text, so re-ingesting unchanged
/// content overwrites the same index entry instead of duplicating it.
pub fn content_id(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_same_id() {
        assert_eq!(content_id("some chunk text"), content_id("some chunk text"));
    }

    #[test]
    fn test_distinct_text_distinct_id() {
        assert_ne!(content_id("chunk a"), content_id("chunk b"));
        assert_ne!(content_id("chunk"), content_id("chunk "));
    }

    #[test]
    fn test_id_is_fixed_length_hex() {
        let id = content_id("anything");
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
