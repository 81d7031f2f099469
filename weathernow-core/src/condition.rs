//! WMO weather code classification.
//!
//! Maps the integer codes returned by Open-Meteo to the presentation metadata
//! used when rendering a snapshot: description, icon, gradient and animation tag.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::Serialize;

/// Two color stops used to theme a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub from: &'static str,
    pub to: &'static str,
}

impl Gradient {
    const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }

    /// Theming token in `from-<a> to-<b>` form.
    pub fn token(&self) -> String {
        format!("from-{} to-{}", self.from, self.to)
    }
}

/// Presentation metadata for one weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherCodeEntry {
    pub description: &'static str,
    pub icon: &'static str,
    pub gradient: Gradient,
    /// Empty when the condition has no animation.
    pub animation: &'static str,
}

impl WeatherCodeEntry {
    const fn new(
        description: &'static str,
        icon: &'static str,
        gradient: Gradient,
        animation: &'static str,
    ) -> Self {
        Self { description, icon, gradient, animation }
    }

    pub fn is_unknown(&self) -> bool {
        *self == UNKNOWN
    }
}

/// Entry returned for any code not in [`KNOWN_CODES`].
pub const UNKNOWN: WeatherCodeEntry =
    WeatherCodeEntry::new("Unknown", "❓", Gradient::new("gray-400", "gray-600"), "");

/// Every code the table knows about, in ascending order.
pub const KNOWN_CODES: [i64; 28] = [
    0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82, 85, 86,
    95, 96, 99,
];

const PULSE: &str = "animate-pulse";
const FADE: &str = "animate-fadeIn";
const RAIN: &str = "animate-rain";
const SNOW: &str = "animate-snow";
const THUNDER: &str = "animate-thunder";

/// Classify a WMO weather code. Total: unknown codes yield [`UNKNOWN`].
pub fn classify(code: i64) -> WeatherCodeEntry {
    use WeatherCodeEntry as E;
    let g = Gradient::new;

    match code {
        0 => E::new("Clear Sky", "☀️", g("yellow-400", "orange-500"), PULSE),
        1 => E::new("Mainly Clear", "🌤️", g("blue-300", "blue-500"), PULSE),
        2 => E::new("Partly Cloudy", "⛅", g("blue-200", "blue-400"), PULSE),
        3 => E::new("Overcast", "☁️", g("gray-300", "gray-500"), ""),
        45 => E::new("Foggy", "🌫️", g("gray-200", "gray-400"), FADE),
        48 => E::new("Depositing Rime Fog", "🌫️", g("gray-200", "gray-400"), FADE),
        51 => E::new("Light Drizzle", "🌦️", g("blue-400", "gray-300"), RAIN),
        53 => E::new("Moderate Drizzle", "🌧️", g("blue-500", "gray-400"), RAIN),
        55 => E::new("Dense Drizzle", "🌧️", g("blue-600", "gray-500"), RAIN),
        56 => E::new("Light Freezing Drizzle", "🌧️❄️", g("blue-300", "purple-300"), RAIN),
        57 => E::new("Dense Freezing Drizzle", "🌧️❄️", g("blue-400", "purple-400"), RAIN),
        61 => E::new("Slight Rain", "🌧️", g("blue-500", "gray-500"), RAIN),
        63 => E::new("Moderate Rain", "🌧️", g("blue-600", "gray-600"), RAIN),
        65 => E::new("Heavy Rain", "🌧️", g("blue-700", "gray-700"), RAIN),
        66 => E::new("Light Freezing Rain", "🌧️❄️", g("blue-400", "purple-400"), RAIN),
        67 => E::new("Heavy Freezing Rain", "🌧️❄️", g("blue-500", "purple-500"), RAIN),
        71 => E::new("Slight Snow", "❄️", g("blue-100", "gray-100"), SNOW),
        73 => E::new("Moderate Snow", "❄️", g("blue-200", "gray-200"), SNOW),
        75 => E::new("Heavy Snow", "❄️", g("blue-300", "gray-300"), SNOW),
        77 => E::new("Snow Grains", "❄️", g("blue-200", "gray-200"), SNOW),
        80 => E::new("Slight Rain Showers", "🌦️", g("blue-400", "gray-400"), RAIN),
        81 => E::new("Moderate Rain Showers", "🌧️", g("blue-500", "gray-500"), RAIN),
        82 => E::new("Violent Rain Showers", "🌧️", g("blue-700", "gray-700"), RAIN),
        85 => E::new("Slight Snow Showers", "❄️", g("blue-200", "gray-200"), SNOW),
        86 => E::new("Heavy Snow Showers", "❄️", g("blue-300", "gray-300"), SNOW),
        95 => E::new("Thunderstorm", "⛈️", g("purple-600", "gray-700"), THUNDER),
        96 => E::new("Thunderstorm With Slight Hail", "⛈️", g("purple-700", "gray-800"), THUNDER),
        99 => E::new("Thunderstorm With Heavy Hail", "⛈️", g("purple-800", "gray-900"), THUNDER),
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_code_has_an_entry() {
        for code in KNOWN_CODES {
            assert!(!classify(code).is_unknown(), "code {code} fell through to Unknown");
        }
    }

    #[test]
    fn every_known_code_has_exact_fields() {
        #[rustfmt::skip]
        let expected: [(i64, &str, &str, &str, &str); 28] = [
            (0, "Clear Sky", "☀️", "from-yellow-400 to-orange-500", "animate-pulse"),
            (1, "Mainly Clear", "🌤️", "from-blue-300 to-blue-500", "animate-pulse"),
            (2, "Partly Cloudy", "⛅", "from-blue-200 to-blue-400", "animate-pulse"),
            (3, "Overcast", "☁️", "from-gray-300 to-gray-500", ""),
            (45, "Foggy", "🌫️", "from-gray-200 to-gray-400", "animate-fadeIn"),
            (48, "Depositing Rime Fog", "🌫️", "from-gray-200 to-gray-400", "animate-fadeIn"),
            (51, "Light Drizzle", "🌦️", "from-blue-400 to-gray-300", "animate-rain"),
            (53, "Moderate Drizzle", "🌧️", "from-blue-500 to-gray-400", "animate-rain"),
            (55, "Dense Drizzle", "🌧️", "from-blue-600 to-gray-500", "animate-rain"),
            (56, "Light Freezing Drizzle", "🌧️❄️", "from-blue-300 to-purple-300", "animate-rain"),
            (57, "Dense Freezing Drizzle", "🌧️❄️", "from-blue-400 to-purple-400", "animate-rain"),
            (61, "Slight Rain", "🌧️", "from-blue-500 to-gray-500", "animate-rain"),
            (63, "Moderate Rain", "🌧️", "from-blue-600 to-gray-600", "animate-rain"),
            (65, "Heavy Rain", "🌧️", "from-blue-700 to-gray-700", "animate-rain"),
            (66, "Light Freezing Rain", "🌧️❄️", "from-blue-400 to-purple-400", "animate-rain"),
            (67, "Heavy Freezing Rain", "🌧️❄️", "from-blue-500 to-purple-500", "animate-rain"),
            (71, "Slight Snow", "❄️", "from-blue-100 to-gray-100", "animate-snow"),
            (73, "Moderate Snow", "❄️", "from-blue-200 to-gray-200", "animate-snow"),
            (75, "Heavy Snow", "❄️", "from-blue-300 to-gray-300", "animate-snow"),
            (77, "Snow Grains", "❄️", "from-blue-200 to-gray-200", "animate-snow"),
            (80, "Slight Rain Showers", "🌦️", "from-blue-400 to-gray-400", "animate-rain"),
            (81, "Moderate Rain Showers", "🌧️", "from-blue-500 to-gray-500", "animate-rain"),
            (82, "Violent Rain Showers", "🌧️", "from-blue-700 to-gray-700", "animate-rain"),
            (85, "Slight Snow Showers", "❄️", "from-blue-200 to-gray-200", "animate-snow"),
            (86, "Heavy Snow Showers", "❄️", "from-blue-300 to-gray-300", "animate-snow"),
            (95, "Thunderstorm", "⛈️", "from-purple-600 to-gray-700", "animate-thunder"),
            (96, "Thunderstorm With Slight Hail", "⛈️", "from-purple-700 to-gray-800", "animate-thunder"),
            (99, "Thunderstorm With Heavy Hail", "⛈️", "from-purple-800 to-gray-900", "animate-thunder"),
        ];

        let codes: Vec<i64> = expected.iter().map(|row| row.0).collect();
        assert_eq!(codes, KNOWN_CODES);

        for (code, description, icon, gradient, animation) in expected {
            let entry = classify(code);
            assert_eq!(entry.description, description, "code {code}");
            assert_eq!(entry.icon, icon, "code {code}");
            assert_eq!(entry.gradient.token(), gradient, "code {code}");
            assert_eq!(entry.animation, animation, "code {code}");
        }
    }

    #[test]
    fn codes_outside_the_table_fall_back() {
        for code in -100..=200 {
            if KNOWN_CODES.contains(&code) {
                continue;
            }
            assert_eq!(classify(code), UNKNOWN, "code {code}");
        }
        assert_eq!(classify(i64::MIN), UNKNOWN);
        assert_eq!(classify(i64::MAX), UNKNOWN);
    }

    #[test]
    fn fallback_entry_fields() {
        let entry = classify(4);
        assert_eq!(entry.description, "Unknown");
        assert_eq!(entry.icon, "❓");
        assert_eq!(entry.gradient.token(), "from-gray-400 to-gray-600");
        assert_eq!(entry.animation, "");
    }

    #[test]
    fn clear_sky() {
        let entry = classify(0);
        assert_eq!(entry.description, "Clear Sky");
        assert_eq!(entry.icon, "☀️");
        assert_eq!(entry.gradient.token(), "from-yellow-400 to-orange-500");
        assert_eq!(entry.animation, "animate-pulse");
    }

    #[test]
    fn overcast_has_no_animation() {
        let entry = classify(3);
        assert_eq!(entry.description, "Overcast");
        assert_eq!(entry.icon, "☁️");
        assert_eq!(entry.gradient.token(), "from-gray-300 to-gray-500");
        assert!(entry.animation.is_empty());
    }

    #[test]
    fn freezing_drizzle() {
        let entry = classify(57);
        assert_eq!(entry.description, "Dense Freezing Drizzle");
        assert_eq!(entry.icon, "🌧️❄️");
        assert_eq!(entry.gradient, Gradient { from: "blue-400", to: "purple-400" });
        assert_eq!(entry.animation, "animate-rain");
    }

    #[test]
    fn snow_grains() {
        let entry = classify(77);
        assert_eq!(entry.description, "Snow Grains");
        assert_eq!(entry.animation, "animate-snow");
    }

    #[test]
    fn heavy_hail_thunderstorm() {
        let entry = classify(99);
        assert_eq!(entry.description, "Thunderstorm With Heavy Hail");
        assert_eq!(entry.icon, "⛈️");
        assert_eq!(entry.gradient.token(), "from-purple-800 to-gray-900");
        assert_eq!(entry.animation, "animate-thunder");
    }

    #[test]
    fn fog_codes_share_presentation() {
        let fog = classify(45);
        let rime = classify(48);
        assert_eq!(fog.icon, rime.icon);
        assert_eq!(fog.gradient, rime.gradient);
        assert_eq!(fog.animation, "animate-fadeIn");
        assert_ne!(fog.description, rime.description);
    }
}
