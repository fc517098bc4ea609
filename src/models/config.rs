//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::DrawSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Listing and detail endpoints
    #[serde(default)]
    pub source: SourceConfig,

    /// Page selectors
    #[serde(default)]
    pub selectors: DrawSelectors,

    /// How many draws to collect
    #[serde(default)]
    pub batch: BatchConfig,

    /// Output file locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.accept_language.trim().is_empty() {
            return Err(AppError::validation("crawler.accept_language is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.batch.deadline_secs == Some(0) {
            return Err(AppError::validation("batch.deadline_secs must be > 0"));
        }

        for (key, value) in [
            ("source.listing_url", &self.source.listing_url),
            ("source.detail_base_url", &self.source.detail_base_url),
        ] {
            let url = Url::parse(value)
                .map_err(|e| AppError::validation(format!("{key} is not a valid URL: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(AppError::validation(format!(
                    "{key} must be an http(s) URL"
                )));
            }
        }

        for (key, value) in self.selectors.named() {
            Selector::parse(value).map_err(|e| AppError::selector(value, format!("{key}: {e:?}")))?;
        }
        if self.selectors.identifier_attr.trim().is_empty() {
            return Err(AppError::validation("selectors.identifier_attr is empty"));
        }

        for (key, value) in [
            ("output.results_file", &self.output.results_file),
            ("output.latest_file", &self.output.latest_file),
            ("output.numbers_file", &self.output.numbers_file),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{key} is empty")));
            }
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept-Language header for HTTP requests
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between detail requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Results archive endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Page listing every archived draw
    #[serde(default = "defaults::listing_url")]
    pub listing_url: String,

    /// Detail page; a draw's query string is appended after `?`
    #[serde(default = "defaults::detail_base_url")]
    pub detail_base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: defaults::listing_url(),
            detail_base_url: defaults::detail_base_url(),
        }
    }
}

/// Batch size settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of most recent draws to collect
    #[serde(default = "defaults::limit")]
    pub limit: usize,

    /// Collect every listed draw, ignoring `limit`
    #[serde(default)]
    pub all: bool,

    /// Stop starting new draws after this many seconds
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            limit: defaults::limit(),
            all: false,
            deadline_secs: None,
        }
    }
}

/// Output file locations, relative to `dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// Ordered array of collected draws
    #[serde(default = "defaults::results_file")]
    pub results_file: String,

    /// Most recent draw as a single record
    #[serde(default = "defaults::latest_file")]
    pub latest_file: String,

    /// Most recent draw as a flat array of winning numbers
    #[serde(default = "defaults::numbers_file")]
    pub numbers_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            results_file: defaults::results_file(),
            latest_file: defaults::latest_file(),
            numbers_file: defaults::numbers_file(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0".into()
    }
    pub fn accept_language() -> String {
        "en-US,en;q=0.9".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        500
    }

    // Source defaults
    pub fn listing_url() -> String {
        "https://www.singaporepools.com.sg/DataFileArchive/Lottery/Output/fourd_result_draw_list_en.html"
            .into()
    }
    pub fn detail_base_url() -> String {
        "https://www.singaporepools.com.sg/en/product/sr/Pages/4d_results.aspx".into()
    }

    // Batch defaults
    pub fn limit() -> usize {
        10
    }

    // Output defaults
    pub fn output_dir() -> String {
        ".".into()
    }
    pub fn results_file() -> String {
        "4d_results.json".into()
    }
    pub fn latest_file() -> String {
        "4d_latest.json".into()
    }
    pub fn numbers_file() -> String {
        "4d.json".into()
    }
}
