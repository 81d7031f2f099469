use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    Config,
    error::ProviderError,
    model::{ForecastPayload, LocationResult},
};

use super::WeatherProvider;

/// Fixed language for geocoding results.
pub const LANGUAGE: &str = "en";

const USER_AGENT: &str = concat!("weathernow/", env!("CARGO_PKG_VERSION"));

const CURRENT_FIELDS: &str =
    "temperature_2m,weather_code,wind_speed_10m,relative_humidity_2m,is_day";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

/// Open-Meteo geocoding + forecast client.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_base: String,
    forecast_base: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self::with_client(http, &config.geocoding_base, &config.forecast_base))
    }

    pub fn with_client(http: Client, geocoding_base: &str, forecast_base: &str) -> Self {
        Self {
            geocoding_base: geocoding_base.trim_end_matches('/').to_string(),
            forecast_base: forecast_base.trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        tracing::debug!(url, ?query, "GET");

        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status { status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<LocationResult>>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, query: &str) -> Result<Vec<LocationResult>, ProviderError> {
        let url = format!("{}/v1/search", self.geocoding_base);

        let parsed: GeocodingResponse = self
            .get_json(
                &url,
                &[
                    ("name", query.to_string()),
                    ("count", "1".to_string()),
                    ("language", LANGUAGE.to_string()),
                ],
            )
            .await?;

        Ok(parsed.results.unwrap_or_default())
    }

    async fn forecast(&self, location: &LocationResult) -> Result<ForecastPayload, ProviderError> {
        let url = format!("{}/v1/forecast", self.forecast_base);

        self.get_json(
            &url,
            &[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ],
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
