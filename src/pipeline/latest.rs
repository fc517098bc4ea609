// src/pipeline/latest.rs

//! Latest-draw pipeline.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Config, DrawRecord};
use crate::storage::DrawStorage;
use crate::utils::http::PageSource;

use super::build_services;

/// Collect the newest listed draw and write it as the latest-draw files.
pub async fn run_latest(
    config: &Config,
    source: Arc<dyn PageSource>,
    storage: &dyn DrawStorage,
) -> Result<DrawRecord> {
    let (listing, collector) = build_services(config, source)?;

    let identifiers = listing.fetch_identifiers().await?;
    let Some(newest) = identifiers.first() else {
        return Err(AppError::parse(listing.listing_url(), "listing contains no draws"));
    };

    let outcome = collector
        .collect(std::slice::from_ref(newest), 1, false)
        .await?;
    let record = outcome
        .batch
        .latest()
        .cloned()
        .ok_or_else(|| AppError::transport(newest.as_str(), "newest draw could not be collected"))?;

    let summary = storage.write_latest(&record).await?;
    log::info!(
        "Saved {} ({}) to {}",
        record.draw_number,
        record.date,
        summary.location
    );

    Ok(record)
}
