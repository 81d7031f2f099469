use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::condition::{UNKNOWN, WeatherCodeEntry, classify};

/// Best geocoding match for a free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// First-level administrative subdivision (state, region, province).
    #[serde(rename = "admin1", default)]
    pub region: Option<String>,
}

/// Decoded body of a forecast response.
///
/// `current` is required; the other blocks are optional and surface as `None`
/// (or default units) when the upstream omits them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastPayload {
    pub current: CurrentConditions,
    #[serde(default)]
    pub current_units: CurrentUnits,
    #[serde(default)]
    pub hourly: Option<HourlySeries>,
    #[serde(default)]
    pub daily: Option<DailySeries>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: f64,
    pub weather_code: i64,
    pub wind_speed_10m: f64,
    pub relative_humidity_2m: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_day: bool,
}

/// Unit strings reported alongside the current block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUnits {
    #[serde(default = "default_temperature_unit")]
    pub temperature_2m: String,
    #[serde(default = "default_wind_unit")]
    pub wind_speed_10m: String,
}

impl Default for CurrentUnits {
    fn default() -> Self {
        Self { temperature_2m: default_temperature_unit(), wind_speed_10m: default_wind_unit() }
    }
}

fn default_temperature_unit() -> String {
    "°C".to_string()
}

fn default_wind_unit() -> String {
    "km/h".to_string()
}

/// Hourly series as aligned arrays. Values are `None` where the upstream
/// model has no data for that slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    #[serde(default, deserialize_with = "deserialize_local_times")]
    pub time: Vec<NaiveDateTime>,
    #[serde(default)]
    pub weather_code: Vec<Option<i64>>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
}

/// Daily series as aligned arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Vec<NaiveDate>,
    #[serde(default)]
    pub weather_code: Vec<Option<i64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub weather_code: Option<i64>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub weather_code: Option<i64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

impl HourlyPoint {
    /// Missing codes classify as Unknown.
    pub fn condition(&self) -> WeatherCodeEntry {
        self.weather_code.map_or(UNKNOWN, classify)
    }
}

impl DailyPoint {
    pub fn condition(&self) -> WeatherCodeEntry {
        self.weather_code.map_or(UNKNOWN, classify)
    }
}

impl HourlySeries {
    /// Zip the aligned arrays; stops at the shortest one.
    pub fn points(&self) -> impl Iterator<Item = HourlyPoint> + '_ {
        self.time
            .iter()
            .zip(&self.weather_code)
            .zip(&self.temperature_2m)
            .map(|((time, code), temp)| HourlyPoint {
                time: *time,
                weather_code: *code,
                temperature: *temp,
            })
    }
}

impl DailySeries {
    pub fn points(&self) -> impl Iterator<Item = DailyPoint> + '_ {
        self.time
            .iter()
            .zip(&self.weather_code)
            .zip(self.temperature_2m_max.iter().zip(&self.temperature_2m_min))
            .map(|((date, code), (max, min))| DailyPoint {
                date: *date,
                weather_code: *code,
                max: *max,
                min: *min,
            })
    }
}

/// Result of one completed search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub region: Option<String>,
    pub country: String,
    pub temperature: f64,
    pub weather_code: i64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub is_day: bool,
    pub units: CurrentUnits,
    pub hourly: Option<HourlySeries>,
    pub daily: Option<DailySeries>,
}

impl WeatherSnapshot {
    pub fn from_parts(location: LocationResult, forecast: ForecastPayload) -> Self {
        let ForecastPayload { current, current_units, hourly, daily } = forecast;

        Self {
            city: location.name,
            region: location.region,
            country: location.country,
            temperature: current.temperature_2m,
            weather_code: current.weather_code,
            wind_speed: current.wind_speed_10m,
            humidity: current.relative_humidity_2m,
            is_day: current.is_day,
            units: current_units,
            hourly,
            daily,
        }
    }

    pub fn condition(&self) -> WeatherCodeEntry {
        classify(self.weather_code)
    }

    /// Temperature with the degree sign and the unit letter, e.g. `21.4°C`.
    pub fn temperature_label(&self) -> String {
        let letter = self.units.temperature_2m.chars().last().map(String::from).unwrap_or_default();
        format!("{}°{}", self.temperature, letter)
    }

    pub fn wind_label(&self) -> String {
        format!("{} {}", self.wind_speed, self.units.wind_speed_10m)
    }

    pub fn humidity_label(&self) -> String {
        format!("{}%", self.humidity)
    }

    pub fn time_of_day(&self) -> &'static str {
        if self.is_day { "Day" } else { "Night" }
    }

    /// `"<region>, <country>"`, only when a region is known.
    pub fn location_label(&self) -> Option<String> {
        self.region
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(|region| format!("{region}, {}", self.country))
    }

    pub fn hourly_points(&self, limit: usize) -> Vec<HourlyPoint> {
        self.hourly
            .as_ref()
            .map(|h| h.points().take(limit).collect())
            .unwrap_or_default()
    }

    pub fn daily_points(&self) -> Vec<DailyPoint> {
        self.daily.as_ref().map(|d| d.points().collect()).unwrap_or_default()
    }
}

/// Open-Meteo reports `is_day` as `0`/`1`; accept booleans as well.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}

/// Local timestamps come without seconds (`2024-05-01T13:00`).
fn deserialize_local_times<'de, D>(deserializer: D) -> Result<Vec<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    raw.iter()
        .map(|s| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{s}': {e}")))
        })
        .collect()
}
