// src/pipeline/collect.rs

//! Batch collection pipeline.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::models::{BatchResult, Config, DrawIdentifier};
use crate::storage::{DrawStorage, WriteSummary};
use crate::utils::http::PageSource;

use super::build_services;

/// Counts reported at the end of a batch run.
#[derive(Debug)]
pub struct RunSummary {
    pub listed: usize,
    pub attempted: usize,
    pub parsed: usize,
    pub skipped: Vec<DrawIdentifier>,
    pub cancelled: bool,
    pub write: WriteSummary,
}

/// Fetch the listing and return its identifiers, newest first.
pub async fn run_list(config: &Config, source: Arc<dyn PageSource>) -> Result<Vec<DrawIdentifier>> {
    let (listing, _) = build_services(config, source)?;
    listing.fetch_identifiers().await
}

/// Collect draws from the archive and write them as the results file.
///
/// An empty listing writes an empty array and succeeds. A listing that
/// cannot be fetched also writes an empty array, then returns the listing
/// error so the caller can exit non-zero.
pub async fn run_collect(
    config: &Config,
    source: Arc<dyn PageSource>,
    storage: &dyn DrawStorage,
    cancel: CancellationToken,
) -> Result<RunSummary> {
    let start_time = Utc::now();
    let (listing, collector) = build_services(config, source)?;
    let collector = collector.with_cancellation(cancel);

    let identifiers = match listing.fetch_identifiers().await {
        Ok(identifiers) => identifiers,
        Err(error) => {
            log::error!("{error}");
            let write = storage.write_batch(&BatchResult::new()).await?;
            log::warn!("Wrote empty results to {}", write.location);
            return Err(error);
        }
    };

    if config.batch.all {
        log::info!("Collecting all {} listed draws", identifiers.len());
    } else {
        log::info!(
            "Collecting up to {} of {} listed draws",
            config.batch.limit,
            identifiers.len()
        );
    }

    let outcome = collector
        .collect(&identifiers, config.batch.limit, config.batch.all)
        .await?;

    let write = storage.write_batch(&outcome.batch).await?;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Saved {} draws to {} ({} attempted, {} skipped{}) in {}s",
        write.count,
        write.location,
        outcome.attempted,
        outcome.skipped.len(),
        if outcome.cancelled { ", stopped early" } else { "" },
        elapsed.num_seconds()
    );
    if !outcome.skipped.is_empty() {
        let skipped: Vec<&str> = outcome.skipped.iter().map(DrawIdentifier::as_str).collect();
        log::warn!("Skipped draws: {}", skipped.join(", "));
    }

    Ok(RunSummary {
        listed: identifiers.len(),
        attempted: outcome.attempted,
        parsed: outcome.parsed(),
        skipped: outcome.skipped,
        cancelled: outcome.cancelled,
        write,
    })
}
