//! Error types surfaced by the search pipeline.

use reqwest::StatusCode;
use thiserror::Error;

const UNEXPECTED: &str = "An unexpected error occurred";

/// Failure of a single upstream call.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("could not build HTTP client: {0}")]
    Client(String),
}

impl ProviderError {
    /// Whether the call failed before a usable response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

/// Outcome of a failed search. Display text is what the user sees.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("City not found. Please try another location.")]
    LocationNotFound,

    #[error("Failed to find location")]
    GeocodeTransport(#[source] ProviderError),

    #[error("Failed to fetch weather data")]
    ForecastTransport(#[source] ProviderError),

    #[error("{}", or_default_message(.0))]
    Unexpected(String),
}

impl SearchError {
    pub(crate) fn from_geocode(err: ProviderError) -> Self {
        if err.is_transport() { Self::GeocodeTransport(err) } else { Self::Unexpected(err.to_string()) }
    }

    pub(crate) fn from_forecast(err: ProviderError) -> Self {
        if err.is_transport() { Self::ForecastTransport(err) } else { Self::Unexpected(err.to_string()) }
    }

    /// Message shown in place of the snapshot.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

fn or_default_message(msg: &str) -> &str {
    if msg.is_empty() { UNEXPECTED } else { msg }
}

/// Failure reading or writing the local key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize recent searches: {0}")]
    Serialize(#[from] serde_json::Error),
}
