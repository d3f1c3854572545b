//! Current-weather snapshot model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::units;

/// Geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub latitude: f64,
    pub longitude: f64,
}

/// Wind reading attached to a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindReading {
    /// Wind speed in m/s
    pub speed: f32,
    /// Wind direction in degrees, normalized to [0, 360)
    pub direction_deg: u16,
    /// 8-point cardinal direction derived from `direction_deg`
    pub cardinal: String,
}

impl WindReading {
    /// Build a reading, normalizing the direction into [0, 360)
    #[must_use]
    pub fn new(speed: f32, direction_deg: u16) -> Self {
        let direction_deg = direction_deg % 360;
        Self {
            speed,
            direction_deg,
            cardinal: units::wind_direction_to_cardinal(direction_deg).to_string(),
        }
    }
}

/// A single point-in-time weather reading for one city, normalized across
/// providers. Constructed fresh per request and discarded after render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Canonical English city name the reading belongs to
    pub city: String,
    /// City coordinate reported by the provider
    pub coord: Coord,
    /// Temperature in Celsius
    pub temperature: f32,
    /// Apparent temperature in Celsius
    pub feels_like: f32,
    /// Relative humidity percentage, clamped to [0, 100]
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: f32,
    /// Human-readable condition description
    pub description: String,
    /// Icon code from the fixed `01d`..`50n` set
    pub icon: String,
    /// Wind reading, when the provider reports one
    pub wind: Option<WindReading>,
    /// Cloud cover percentage
    pub cloud_cover: u8,
    /// Visibility in kilometers
    pub visibility_km: f32,
    /// Precipitation over the last hour in mm, when any fell
    pub precipitation_mm: Option<f32>,
    /// Observation time
    pub observed_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Clamp percentage fields into their valid ranges. Providers have been
    /// seen reporting humidity above 100 during sensor glitches.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.humidity = self.humidity.min(100);
        self.cloud_cover = self.cloud_cover.min(100);
        self
    }

    /// Format the condition line shown in comparison tables
    #[must_use]
    pub fn format_conditions(&self) -> String {
        format!("{} {}", units::icon_emoji(&self.icon), self.description)
    }
}
