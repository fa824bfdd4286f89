//! Storage-key to namespace derivation

/// Derive the vector index namespace for a document's storage key.
///
/// Strips every character outside the 7-bit ASCII range and keeps the rest
/// verbatim. Pure and stable: the same key always maps to the same
/// namespace. Note that stripping is not injective; two keys differing only
/// in non-ASCII characters share a namespace.
pub fn resolve(storage_key: &str) -> String {
    storage_key.chars().filter(|c| c.is_ascii()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_key_unchanged() {
        assert_eq!(resolve("uploads/report 1.pdf"), "uploads/report 1.pdf");
    }

    #[test]
    fn test_non_ascii_stripped() {
        assert_eq!(resolve("uploads/résumé 1.pdf"), "uploads/rsum 1.pdf");
        assert_eq!(resolve("文档.pdf"), ".pdf");
    }

    #[test]
    fn test_deterministic() {
        let key = "uploads/naïve-draft.pdf";
        assert_eq!(resolve(key), resolve(key));
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(resolve(""), "");
    }
}
