//! Pipeline entry points for collector operations.
//!
//! - `run_list`: Fetch the listing and return its draw identifiers
//! - `run_collect`: Collect a batch of draws and write the results file
//! - `run_latest`: Collect the newest draw and write the latest-draw files

pub mod collect;
pub mod latest;

use std::sync::Arc;

use crate::error::Result;
use crate::models::Config;
use crate::services::{BoundedBatchCollector, DrawParser, ListingFetcher};
use crate::utils::http::PageSource;

pub use collect::{RunSummary, run_collect, run_list};
pub use latest::run_latest;

/// Wire the listing fetcher and collector to one page source.
fn build_services(
    config: &Config,
    source: Arc<dyn PageSource>,
) -> Result<(ListingFetcher, BoundedBatchCollector)> {
    let parser = Arc::new(DrawParser::new(&config.selectors)?);
    let listing = ListingFetcher::new(
        Arc::clone(&source),
        Arc::clone(&parser),
        &config.source.listing_url,
    );
    let collector = BoundedBatchCollector::new(source, parser, config);
    Ok((listing, collector))
}
