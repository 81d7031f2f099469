use crate::{
    Config,
    error::ProviderError,
    model::{ForecastPayload, LocationResult},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// The two upstream calls a search needs.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a free-text place name. An empty vec means no match.
    async fn geocode(&self, query: &str) -> Result<Vec<LocationResult>, ProviderError>;

    /// Fetch current, hourly and daily data for a resolved location.
    async fn forecast(&self, location: &LocationResult) -> Result<ForecastPayload, ProviderError>;
}

/// Construct the default provider from config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, ProviderError> {
    Ok(Box::new(OpenMeteoProvider::from_config(config)?))
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn geocode(&self, query: &str) -> Result<Vec<LocationResult>, ProviderError> {
        (**self).geocode(query).await
    }

    async fn forecast(&self, location: &LocationResult) -> Result<ForecastPayload, ProviderError> {
        (**self).forecast(location).await
    }
}
