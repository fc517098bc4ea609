//! Bounded, sequential draw collector.
//!
//! Fetches detail pages one at a time in listing order. A draw that cannot
//! be fetched or parsed is logged and skipped. Any other error (I/O,
//! configuration) ends the batch and is returned unchanged.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::models::{BatchResult, Config, DrawIdentifier, DrawRecord};
use crate::services::DrawParser;
use crate::utils::detail_url;
use crate::utils::http::PageSource;

/// Summary of a collection run.
#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// Parsed records in input order
    pub batch: BatchResult,
    /// Number of draws a fetch was started for
    pub attempted: usize,
    /// Draws that failed, in input order
    pub skipped: Vec<DrawIdentifier>,
    /// The run stopped early on cancellation or deadline
    pub cancelled: bool,
}

impl CollectOutcome {
    pub fn parsed(&self) -> usize {
        self.batch.len()
    }
}

/// Service for collecting draw records from detail pages.
pub struct BoundedBatchCollector {
    source: Arc<dyn PageSource>,
    parser: Arc<DrawParser>,
    detail_base_url: String,
    delay: Duration,
    deadline: Option<Duration>,
    cancel: CancellationToken,
}

impl BoundedBatchCollector {
    /// Create a collector using the configured endpoint, delay and deadline.
    pub fn new(source: Arc<dyn PageSource>, parser: Arc<DrawParser>, config: &Config) -> Self {
        Self {
            source,
            parser,
            detail_base_url: config.source.detail_base_url.clone(),
            delay: Duration::from_millis(config.crawler.request_delay_ms),
            deadline: config.batch.deadline_secs.map(Duration::from_secs),
            cancel: CancellationToken::new(),
        }
    }

    /// Stop between draws once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Collect up to `limit` draws, or every draw when `unbounded`.
    pub async fn collect(
        &self,
        identifiers: &[DrawIdentifier],
        limit: usize,
        unbounded: bool,
    ) -> Result<CollectOutcome> {
        let total = if unbounded {
            identifiers.len()
        } else {
            limit.min(identifiers.len())
        };
        let started = Instant::now();
        let mut outcome = CollectOutcome::default();

        for (index, identifier) in identifiers.iter().take(total).enumerate() {
            if index > 0 {
                self.pause().await;
            }
            if self.should_stop(started) {
                log::warn!(
                    "Stopping after {} of {} draws: {}",
                    index,
                    total,
                    if self.cancel.is_cancelled() {
                        "cancelled"
                    } else {
                        "deadline reached"
                    }
                );
                outcome.cancelled = true;
                break;
            }

            outcome.attempted += 1;
            log::info!("[{}/{}] Fetching draw {}", index + 1, total, identifier);

            match self.fetch_record(identifier).await {
                Ok(record) => outcome.batch.push(record),
                Err(error) if error.is_recoverable() => {
                    log::warn!("Skipping draw {}: {}", identifier, error);
                    outcome.skipped.push(identifier.clone());
                }
                Err(error) => {
                    log::error!("Aborting batch at draw {}: {}", identifier, error);
                    return Err(error);
                }
            }
        }

        Ok(outcome)
    }

    /// Fetch and parse a single draw.
    async fn fetch_record(&self, identifier: &DrawIdentifier) -> Result<DrawRecord> {
        let url = detail_url(&self.detail_base_url, identifier);
        let body = self.source.fetch(&url).await?;
        self.parser.parse_record(&body, identifier.as_str(), Utc::now())
    }

    /// Wait the politeness delay, returning early on cancellation.
    async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = tokio::time::sleep(self.delay) => {}
        }
    }

    fn should_stop(&self, started: Instant) -> bool {
        self.cancel.is_cancelled()
            || self
                .deadline
                .is_some_and(|deadline| started.elapsed() >= deadline)
    }
}
