//! Terminal rendering of snapshots and recent searches.

use std::fmt;

use chrono::Local;
use weathernow_core::{RecentSearchEntry, RecentSearches, WeatherSnapshot};

/// Hours shown in the hourly strip.
const HOURLY_WINDOW: usize = 24;

pub fn snapshot(snapshot: &WeatherSnapshot) {
    print!("{}", format_snapshot(snapshot));
}

pub fn recents(recents: &RecentSearches) {
    println!("Recent searches:");
    for (i, entry) in recents.iter().enumerate() {
        let when = entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        println!("  {}. {}  ({when})", i + 1, recent_label(entry));
    }
}

pub fn recent_label(entry: &RecentSearchEntry) -> String {
    match entry.region.as_deref().filter(|r| !r.is_empty()) {
        Some(region) => format!("{}, {region}, {}", entry.city, entry.country),
        None if entry.country.is_empty() => entry.city.clone(),
        None => format!("{}, {}", entry.city, entry.country),
    }
}

pub fn format_snapshot(s: &WeatherSnapshot) -> String {
    SnapshotView(s).to_string()
}

/// Blank when the upstream had no value for the slot.
fn degrees(value: Option<f64>) -> String {
    value.map(|v| format!("{v}°")).unwrap_or_default()
}

struct SnapshotView<'a>(&'a WeatherSnapshot);

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let info = s.condition();

        writeln!(f, "{}  {}", info.icon, s.city)?;
        if let Some(line) = s.location_label() {
            writeln!(f, "   {line}")?;
        }
        writeln!(f, "   {}  {}", s.temperature_label(), info.description)?;
        writeln!(f)?;
        writeln!(f, "   Wind Speed   {}", s.wind_label())?;
        writeln!(f, "   Humidity     {}", s.humidity_label())?;
        writeln!(f, "   Time of Day  {}", s.time_of_day())?;

        let hours = s.hourly_points(HOURLY_WINDOW);
        if !hours.is_empty() {
            writeln!(f)?;
            writeln!(f, "24-Hour Forecast")?;
            for h in hours {
                writeln!(
                    f,
                    "   {}  {}  {}",
                    h.time.format("%H:00"),
                    h.condition().icon,
                    degrees(h.temperature)
                )?;
            }
        }

        let days = s.daily_points();
        if !days.is_empty() {
            writeln!(f)?;
            writeln!(f, "Daily Forecast")?;
            for d in days {
                let day = d.condition();
                writeln!(
                    f,
                    "   {}  {}  {} / {}  {}",
                    d.date.format("%a %d %b"),
                    day.icon,
                    degrees(d.max),
                    degrees(d.min),
                    day.description
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use weathernow_core::{ForecastPayload, LocationResult};

    fn snapshot_with(region: Option<&str>, hourly: bool) -> WeatherSnapshot {
        let mut body = serde_json::json!({
            "current": {
                "temperature_2m": 21.5,
                "weather_code": 0,
                "wind_speed_10m": 7.0,
                "relative_humidity_2m": 33,
                "is_day": 1
            },
            "current_units": { "temperature_2m": "°C", "wind_speed_10m": "km/h" }
        });
        if hourly {
            body["hourly"] = serde_json::json!({
                "time": ["2024-05-01T09:00"],
                "weather_code": [61],
                "temperature_2m": [14.0]
            });
        }
        let payload: ForecastPayload = serde_json::from_value(body).unwrap();
        let location = LocationResult {
            latitude: 0.0,
            longitude: 0.0,
            name: "Madrid".into(),
            country: "Spain".into(),
            region: region.map(String::from),
        };
        WeatherSnapshot::from_parts(location, payload)
    }

    #[test]
    fn formats_current_conditions() {
        let text = format_snapshot(&snapshot_with(Some("Madrid"), false));
        assert!(text.contains("☀️  Madrid"));
        assert!(text.contains("Madrid, Spain"));
        assert!(text.contains("21.5°C  Clear Sky"));
        assert!(text.contains("7 km/h"));
        assert!(text.contains("33%"));
        assert!(text.contains("Day"));
        assert!(!text.contains("24-Hour Forecast"));
    }

    #[test]
    fn formats_hourly_strip() {
        let text = format_snapshot(&snapshot_with(None, true));
        assert!(text.contains("24-Hour Forecast"));
        assert!(text.contains("09:00  🌧️  14°"));
    }

    #[test]
    fn missing_series_values_render_blank_and_unknown() {
        let mut s = snapshot_with(None, true);
        if let Some(h) = s.hourly.as_mut() {
            h.weather_code = vec![None];
            h.temperature_2m = vec![None];
        }
        let text = format_snapshot(&s);
        assert!(text.contains("09:00  ❓"));
        assert!(!text.contains("14°"));
    }

    #[test]
    fn recent_labels() {
        let mut entry = RecentSearchEntry {
            city: "Paris".into(),
            region: Some("Île-de-France".into()),
            country: "France".into(),
            timestamp: Utc.timestamp_millis_opt(0).unwrap(),
        };
        assert_eq!(recent_label(&entry), "Paris, Île-de-France, France");

        entry.region = None;
        assert_eq!(recent_label(&entry), "Paris, France");
    }
}
