//! Listing page fetcher.
//!
//! Retrieves the archive index and returns the draw identifiers it lists,
//! newest first.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::DrawIdentifier;
use crate::services::DrawParser;
use crate::utils::http::PageSource;

/// Service for reading draw identifiers from the listing page.
pub struct ListingFetcher {
    source: Arc<dyn PageSource>,
    parser: Arc<DrawParser>,
    listing_url: String,
}

impl ListingFetcher {
    pub fn new(
        source: Arc<dyn PageSource>,
        parser: Arc<DrawParser>,
        listing_url: impl Into<String>,
    ) -> Self {
        Self {
            source,
            parser,
            listing_url: listing_url.into(),
        }
    }

    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    /// Fetch the listing page once and extract its identifiers.
    ///
    /// A failed retrieval is returned as [`AppError::Listing`]; the caller
    /// decides whether that ends the run.
    pub async fn fetch_identifiers(&self) -> Result<Vec<DrawIdentifier>> {
        log::debug!("Fetching listing {}", self.listing_url);

        let body = self
            .source
            .fetch(&self.listing_url)
            .await
            .map_err(|e| AppError::listing(&self.listing_url, e))?;

        let identifiers = self.parser.parse_identifiers(&body);
        log::info!("Listing returned {} draws", identifiers.len());
        Ok(identifiers)
    }
}
