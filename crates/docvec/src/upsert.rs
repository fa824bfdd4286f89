//! Batched, retried writes into the vector index

use futures::future::try_join_all;
use std::sync::Arc;

use crate::config::UpsertConfig;
use crate::error::{Error, Result};
use crate::providers::VectorIndexProvider;
use crate::types::EmbeddedChunk;

/// Writes embedded records in fixed-size batches with bounded retry.
///
/// Batches preserve input order and target one namespace. Sibling batches
/// are written concurrently; a batch that exhausts its attempts surfaces the
/// final attempt's error and aborts the run. Batches already committed are
/// not rolled back.
pub struct BatchUpserter {
    index: Arc<dyn VectorIndexProvider>,
    batch_size: usize,
    max_attempts: usize,
}

impl BatchUpserter {
    /// Create a new upserter from configuration
    pub fn new(index: Arc<dyn VectorIndexProvider>, config: &UpsertConfig) -> Self {
        Self {
            index,
            batch_size: config.batch_size.max(1),
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Upsert every record into `namespace`
    pub async fn upsert_all(&self, namespace: &str, records: &[EmbeddedChunk]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let batches: Vec<&[EmbeddedChunk]> = records.chunks(self.batch_size).collect();
        tracing::info!(
            "upserting {} records in {} batches to {} namespace {:?}",
            records.len(),
            batches.len(),
            self.index.name(),
            namespace
        );

        try_join_all(
            batches
                .into_iter()
                .enumerate()
                .map(|(batch_index, batch)| self.upsert_batch(namespace, batch_index, batch)),
        )
        .await?;

        Ok(())
    }

    /// Write one batch, resubmitting it unchanged on failure up to the
    /// attempt ceiling.
    async fn upsert_batch(
        &self,
        namespace: &str,
        batch_index: usize,
        batch: &[EmbeddedChunk],
    ) -> Result<()> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match self.index.upsert(namespace, batch).await {
                Ok(()) => {
                    tracing::debug!(
                        "batch {} ({} records) upserted on attempt {}",
                        batch_index,
                        batch.len(),
                        attempt
                    );
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        "batch {} upsert attempt {}/{} failed: {}",
                        batch_index,
                        attempt,
                        self.max_attempts,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::index_write("batch upsert made no attempts")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FlakyIndex {
        /// IDs submitted per upsert call, in call order
        calls: Mutex<Vec<Vec<String>>>,
        failures_remaining: AtomicUsize,
    }

    impl FlakyIndex {
        fn failing(failures: usize) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failures_remaining: AtomicUsize::new(failures),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VectorIndexProvider for FlakyIndex {
        async fn upsert(&self, _namespace: &str, records: &[EmbeddedChunk]) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(records.iter().map(|r| r.id.clone()).collect());

            if self.failures_remaining.load(Ordering::SeqCst) > 0 {
                self.failures_remaining.fetch_sub(1, Ordering::SeqCst);
                return Err(Error::index_write("transient write failure"));
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    fn records(count: usize) -> Vec<EmbeddedChunk> {
        (0..count)
            .map(|i| EmbeddedChunk {
                id: format!("id-{i}"),
                vector: vec![i as f32],
                metadata: ChunkMetadata {
                    page_number: 1,
                    text: String::new(),
                },
            })
            .collect()
    }

    fn upserter(index: Arc<FlakyIndex>, batch_size: usize, max_attempts: usize) -> BatchUpserter {
        BatchUpserter::new(
            index,
            &UpsertConfig {
                batch_size,
                max_attempts,
            },
        )
    }

    #[tokio::test]
    async fn test_partitions_preserve_order_and_cover_all_records() {
        let index = Arc::new(FlakyIndex::failing(0));
        let upserter = upserter(index.clone(), 50, 3);

        upserter.upsert_all("ns", &records(120)).await.unwrap();

        let calls = index.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].len(), 50);
        assert_eq!(calls[1].len(), 50);
        assert_eq!(calls[2].len(), 20);

        let flattened: Vec<String> = calls.into_iter().flatten().collect();
        let expected: Vec<String> = (0..120).map(|i| format!("id-{i}")).collect();
        assert_eq!(flattened, expected);
    }

    #[tokio::test]
    async fn test_no_records_no_calls() {
        let index = Arc::new(FlakyIndex::failing(0));
        let upserter = upserter(index.clone(), 50, 3);

        upserter.upsert_all("ns", &[]).await.unwrap();
        assert!(index.calls().is_empty());
    }

    #[tokio::test]
    async fn test_batch_retried_with_identical_content_until_success() {
        let index = Arc::new(FlakyIndex::failing(2));
        let upserter = upserter(index.clone(), 50, 3);

        upserter.upsert_all("ns", &records(5)).await.unwrap();

        let calls = index.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[1], calls[2]);
        assert_eq!(calls[0].len(), 5);
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_final_error() {
        let index = Arc::new(FlakyIndex::failing(usize::MAX));
        let upserter = upserter(index.clone(), 50, 3);

        let err = upserter.upsert_all("ns", &records(5)).await.unwrap_err();
        assert!(matches!(err, Error::IndexWrite(_)));
        assert_eq!(index.calls().len(), 3);
    }
}
