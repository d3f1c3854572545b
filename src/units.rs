//! Unit conversion, cardinal directions and icon tables

use serde::{Deserialize, Serialize};

/// Temperature unit requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Parse a unit tag from a query parameter; unknown tags fall back to
    /// Celsius.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "f" | "fahrenheit" => TemperatureUnit::Fahrenheit,
            _ => TemperatureUnit::Celsius,
        }
    }

    /// Convert a Celsius value into this unit
    #[must_use]
    pub fn from_celsius(self, celsius: f32) -> f32 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }

    /// Unit symbol for display ("°C" / "°F")
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// Convert Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert wind degrees to an 8-point cardinal direction
#[must_use]
pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
    const DIRECTIONS: [&str; 9] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW", "N"];
    let index = ((f64::from(degrees % 360) / 45.0).round() as usize).min(8);
    DIRECTIONS[index]
}

/// Map a provider condition text to an icon code from the fixed
/// `01d`..`50d` set. Unrecognized conditions default to clear sky.
#[must_use]
pub fn icon_for_condition(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();
    if condition.contains("clear") || condition.contains("sunny") {
        "01d"
    } else if condition.contains("partly cloudy") || condition.contains("few clouds") {
        "02d"
    } else if condition.contains("cloudy") || condition.contains("overcast") {
        "04d"
    } else if condition.contains("rain") || condition.contains("drizzle") {
        "10d"
    } else if condition.contains("storm") || condition.contains("thunder") {
        "11d"
    } else if condition.contains("snow") {
        "13d"
    } else if condition.contains("mist") || condition.contains("fog") {
        "50d"
    } else {
        "01d"
    }
}

/// Emoji for an icon code, for table cells and comparison rows
#[must_use]
pub fn icon_emoji(icon: &str) -> &'static str {
    match icon {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "🌨️",
        "50d" | "50n" => "🌫️",
        _ => "❓",
    }
}
