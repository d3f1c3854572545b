//! Mock data generator, used when no API credential is configured
//!
//! Produces plausible random readings: current temperature in [15,35] °C,
//! humidity in [30,80], wind speed in [1,10] m/s, a 30% precipitation
//! probability, and condition text derived from temperature thresholds.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use rand::Rng;
use tracing::instrument;

use crate::models::{Coord, Forecast, ForecastPoint, WeatherSnapshot, WindReading};
use crate::weather::WeatherProvider;
use crate::{Result, cities};

// Fallback coordinate for cities missing from the reference table (Jerusalem).
const DEFAULT_COORD: Coord = Coord {
    latitude: 31.77,
    longitude: 35.21,
};

pub struct MockProvider;

impl MockProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let city = cities::query_name(city);
        Ok(mock_current(city, Utc::now()))
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Forecast> {
        let city = cities::query_name(city);
        Ok(mock_forecast(city, Utc::now()))
    }
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Condition and icon for a current-weather reading
fn current_condition(temperature: f32, has_precipitation: bool) -> (&'static str, &'static str) {
    if temperature > 30.0 {
        ("clear sky", "01d")
    } else if temperature > 25.0 {
        ("few clouds", "02d")
    } else if temperature > 20.0 {
        if has_precipitation {
            ("light rain", "10d")
        } else {
            ("scattered clouds", "03d")
        }
    } else if temperature > 15.0 {
        if has_precipitation {
            ("moderate rain", "10d")
        } else {
            ("broken clouds", "04d")
        }
    } else if has_precipitation {
        ("heavy rain", "10d")
    } else {
        ("overcast clouds", "04d")
    }
}

/// Condition and icon for a forecast point, with day/night icon variants
fn forecast_condition(temperature: f32, daytime: bool) -> (&'static str, &'static str) {
    let (description, day_icon, night_icon) = if temperature > 30.0 {
        ("clear sky", "01d", "01n")
    } else if temperature > 25.0 {
        ("few clouds", "02d", "02n")
    } else if temperature > 20.0 {
        ("scattered clouds", "03d", "03n")
    } else if temperature > 15.0 {
        ("broken clouds", "04d", "04n")
    } else {
        ("light rain", "10d", "10n")
    };
    (description, if daytime { day_icon } else { night_icon })
}

pub(crate) fn mock_current(city: &str, now: DateTime<Utc>) -> WeatherSnapshot {
    let mut rng = rand::rng();

    let temperature = round1(rng.random_range(15.0..35.0));
    let humidity: u8 = rng.random_range(30..=80);
    let wind_speed = round1(rng.random_range(1.0..10.0));
    let wind_deg: u16 = rng.random_range(0..=359);
    let has_precipitation = rng.random_bool(0.3);

    let (description, icon) = current_condition(temperature, has_precipitation);

    let precipitation_mm = has_precipitation.then(|| {
        if temperature > 2.0 {
            round1(rng.random_range(0.5..5.0))
        } else {
            // Snow, rare in Israel but possible
            round1(rng.random_range(0.1..2.0))
        }
    });

    let coord = cities::find(city).map_or(DEFAULT_COORD, |c| Coord {
        latitude: c.latitude,
        longitude: c.longitude,
    });

    WeatherSnapshot {
        city: city.to_string(),
        coord,
        temperature,
        feels_like: round1(temperature - 2.0),
        humidity,
        pressure: 1013.0,
        description: description.to_string(),
        icon: icon.to_string(),
        wind: Some(WindReading::new(wind_speed, wind_deg)),
        cloud_cover: rng.random_range(0..=100),
        visibility_km: 10.0,
        precipitation_mm,
        observed_at: now,
    }
    .normalized()
}

pub(crate) fn mock_forecast(city: &str, now: DateTime<Utc>) -> Forecast {
    let mut rng = rand::rng();

    // Seasonal base temperature: Israeli summer runs roughly April-October.
    let is_summer = (4..=10).contains(&now.month());
    let base_temp: f32 = if is_summer {
        rng.random_range(25.0..33.0)
    } else {
        rng.random_range(10.0..20.0)
    };

    let start = now
        .with_hour(0)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);

    let mut points = Vec::with_capacity(5 * 8);
    for day in 0..5i64 {
        for hour in [0u32, 3, 6, 9, 12, 15, 18, 21] {
            let timestamp = start + Duration::days(day) + Duration::hours(i64::from(hour));

            let hour_adjustment = match hour {
                6..12 => 2.0,  // morning warming
                12..18 => 4.0, // afternoon peak
                18..21 => 1.0, // evening cooling
                _ => 0.0,
            };

            let temperature = round1(base_temp + hour_adjustment + rng.random_range(-2.0..2.0));
            let daytime = (6..18).contains(&hour);
            let (description, icon) = forecast_condition(temperature, daytime);

            points.push(ForecastPoint {
                timestamp,
                temperature,
                humidity: rng.random_range(30..=80),
                description: description.to_string(),
                icon: icon.to_string(),
            });
        }
    }

    Forecast::new(city.to_string(), points)
}
