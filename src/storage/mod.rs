//! Storage abstractions for draw results.
//!
//! ## Output Files
//!
//! ```text
//! {dir}/
//! ├── 4d_results.json   # Ordered array of collected draws, newest first
//! ├── 4d_latest.json    # Newest draw as a single record
//! └── 4d.json           # Newest draw as a flat array of winning numbers
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{BatchResult, DrawRecord};

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Where the primary file was written
    pub location: String,
    /// Number of records written
    pub count: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for draw result storage backends.
#[async_trait]
pub trait DrawStorage: Send + Sync {
    /// Replace the results file with `batch`.
    async fn write_batch(&self, batch: &BatchResult) -> Result<WriteSummary>;

    /// Replace the latest-draw record and winning-numbers files.
    async fn write_latest(&self, record: &DrawRecord) -> Result<WriteSummary>;

    /// Load the results file. Missing file yields an empty batch.
    async fn load_batch(&self) -> Result<BatchResult>;

    /// Load the latest-draw record, if present.
    async fn load_latest(&self) -> Result<Option<DrawRecord>>;
}
