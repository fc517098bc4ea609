// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Anything that can return the HTML body for a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a page body. Non-success responses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    let language = HeaderValue::from_str(&config.accept_language).map_err(|e| {
        AppError::config(format!(
            "crawler.accept_language is not a valid header value: {e}"
        ))
    })?;
    headers.insert(ACCEPT_LANGUAGE, language);

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Page source backed by a reqwest client.
#[derive(Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client from configuration and wrap it.
    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
