// src/models/mod.rs

//! Domain models for the collector.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod draw;
mod selectors;

// Re-export all public types
pub use config::{BatchConfig, Config, CrawlerConfig, OutputConfig, SourceConfig};
pub use draw::{BatchResult, DrawIdentifier, DrawRecord};
pub use selectors::DrawSelectors;
