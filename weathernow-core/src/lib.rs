//! Core library for the `weathernow` CLI.
//!
//! This crate defines:
//! - The WMO weather code classification table
//! - The geocode → forecast search pipeline and its error taxonomy
//! - The recent-searches list and its key-value persistence
//! - Configuration handling
//!
//! It is used by `weathernow-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod recents;
pub mod search;
pub mod session;

pub use condition::{Gradient, WeatherCodeEntry, classify};
pub use config::Config;
pub use error::{ProviderError, SearchError, StoreError};
pub use model::{ForecastPayload, LocationResult, WeatherSnapshot};
pub use provider::{OpenMeteoProvider, WeatherProvider, provider_from_config};
pub use recents::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, RecentSearchEntry, RecentSearchStore,
    RecentSearches,
};
pub use search::{SearchOutcome, search, search_now};
pub use session::{SearchStatus, WeatherSession};
