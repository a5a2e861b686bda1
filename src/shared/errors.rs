//! Error handling for the application

use thiserror::Error;

/// Outbound data API failures. Always soft: the tick is skipped.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response body: {0}")]
    Decode(String),
}

/// Messaging failures. Logged by the caller and never retried.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Telegram returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Telegram rejected message: {0}")]
    Rejected(String),
}

/// Configuration errors detected at startup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Section [{0}] is required for this command")]
    MissingSection(&'static str),
}
