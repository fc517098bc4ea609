// src/error.rs

//! Unified error handling for the collector.

use std::fmt;

use thiserror::Error;

/// Result type alias for collector operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (includes non-success status codes)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// A page could not be retrieved
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The listing page could not be retrieved
    #[error("Listing fetch failed for {url}: {message}")]
    Listing { url: String, message: String },

    /// Document did not have the expected structure
    #[error("Parse error for {context}: {message}")]
    Parse { context: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Coarse error category used to decide whether a failure is contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or non-success status.
    Transport,
    /// Selector or document-level structure problem.
    Parse,
    /// Anything that must stop the run.
    Fatal,
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a transport error for a URL.
    pub fn transport(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a listing failure error.
    pub fn listing(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Listing {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a document-level parse error with context.
    pub fn parse(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::Transport { .. } | Self::Listing { .. } => ErrorKind::Transport,
            Self::Selector { .. } | Self::Parse { .. } => ErrorKind::Parse,
            Self::Io(_)
            | Self::Json(_)
            | Self::Toml(_)
            | Self::Config(_)
            | Self::Validation(_) => ErrorKind::Fatal,
        }
    }

    /// Whether a per-item collector may skip this error and continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Fatal)
    }
}
