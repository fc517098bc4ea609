//! Service layer for the collector.
//!
//! This module contains the business logic for:
//! - Page extraction (`DrawParser`)
//! - Listing retrieval (`ListingFetcher`)
//! - Sequential draw collection (`BoundedBatchCollector`)

mod collector;
mod listing;
mod parser;

#[cfg(test)]
pub(crate) mod fixtures;

pub use collector::{BoundedBatchCollector, CollectOutcome};
pub use listing::ListingFetcher;
pub use parser::DrawParser;
