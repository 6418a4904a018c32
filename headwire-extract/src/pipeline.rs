//! Batch orchestration: sequential batches of concurrency-limited records.

use crate::fetcher::TitleFetcher;
use crate::normalize::clean_title;
use crate::record::NewsRecord;
use crate::retry::Retrier;
use crate::{NO_TITLE, TitleOutcome};
use headwire_common::ExtractorConfig;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::sleep;

/// Drives a full record batch through extraction, retry, and normalization.
///
/// Batches run strictly in input order with a cooldown pause between them
/// to spread load on remote origins; records inside a batch run
/// concurrently up to the configured ceiling, and results are reassembled
/// into original input positions.
pub struct HeadlinePipeline {
    fetcher: Arc<dyn TitleFetcher>,
    config: ExtractorConfig,
}

impl HeadlinePipeline {
    pub fn new(fetcher: Arc<dyn TitleFetcher>, config: ExtractorConfig) -> Self {
        Self { fetcher, config }
    }

    /// Enrich every record with a `title` field.
    ///
    /// The output has the same length and order as the input. The worst
    /// outcome for any single record is the sentinel title; nothing a
    /// record does can abort the batch. An empty input yields an empty
    /// output.
    pub async fn enrich_all(&self, records: Vec<NewsRecord>) -> Vec<NewsRecord> {
        if records.is_empty() {
            return Vec::new();
        }

        let batch_size = self.config.batch_size.max(1);
        let total_batches = records.len().div_ceil(batch_size);
        // The limiter lives for exactly one invocation; no state is shared
        // across pipeline calls.
        let limiter = Arc::new(Semaphore::new(self.config.max_concurrent_requests.max(1)));
        let retrier = Retrier::new(self.config.max_retries, self.config.backoff_base());

        let mut enriched = Vec::with_capacity(records.len());
        for (batch_idx, batch) in records.chunks(batch_size).enumerate() {
            tracing::info!(
                target: "pipeline.batch",
                batch = batch_idx + 1,
                total_batches,
                records = batch.len(),
                "batch.start"
            );

            let tasks = batch.iter().cloned().map(|record| {
                let fetcher = Arc::clone(&self.fetcher);
                let limiter = Arc::clone(&limiter);
                async move { enrich_one(fetcher, limiter, retrier, record).await }
            });
            // join_all returns results in task order, which restores the
            // original record positions regardless of completion order.
            let mut done = futures::future::join_all(tasks).await;
            enriched.append(&mut done);

            if batch_idx + 1 < total_batches {
                sleep(self.config.batch_cooldown()).await;
            }
        }

        enriched
    }
}

/// Process one record end to end: resolve the target address, hold a
/// limiter permit across the whole attempt chain, and settle on a
/// normalized title or the sentinel.
async fn enrich_one(
    fetcher: Arc<dyn TitleFetcher>,
    limiter: Arc<Semaphore>,
    retrier: Retrier,
    mut record: NewsRecord,
) -> NewsRecord {
    let Some(url) = record.target_url() else {
        tracing::warn!(target: "pipeline.record", "record carries no usable url");
        record.set_title(NO_TITLE);
        return record;
    };

    // The permit is released when it drops, on every exit path.
    let Ok(_permit) = limiter.acquire_owned().await else {
        record.set_title(NO_TITLE);
        return record;
    };

    let outcome = retrier
        .run(|_| {
            let fetcher = Arc::clone(&fetcher);
            let url = url.clone();
            async move { fetcher.title_for(&url).await }
        })
        .await;

    let title = match outcome {
        TitleOutcome::Found(raw) => {
            let cleaned = clean_title(&raw);
            // A title that normalizes to nothing is no title.
            if cleaned.is_empty() {
                NO_TITLE.to_string()
            } else {
                cleaned
            }
        }
        TitleOutcome::NotFound => NO_TITLE.to_string(),
    };

    record.set_title(title);
    record
}
