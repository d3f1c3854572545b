//! OpenWeatherMap backend

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use tracing::instrument;

use crate::models::{Coord, Forecast, ForecastPoint, WeatherSnapshot, WindReading};
use crate::weather::{WeatherProvider, get_json, http_client};
use crate::{Result, cities};

pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherProvider {
    pub fn new(base_url: String, api_key: String, timeout_seconds: u32) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout_seconds)?,
            base_url,
            api_key,
        })
    }

    fn url(&self, endpoint: &str, city: &str) -> String {
        format!(
            "{}/{}?q={}&appid={}&units=metric",
            self.base_url,
            endpoint,
            urlencoding::encode(&format!("{city},IL")),
            self.api_key
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        "openweathermap"
    }

    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let city = cities::query_name(city);
        let response: wire::CurrentResponse =
            get_json(&self.client, &self.url("weather", city), city).await?;
        Ok(response.into_snapshot(city))
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Forecast> {
        let city = cities::query_name(city);
        let response: wire::ForecastResponse =
            get_json(&self.client, &self.url("forecast", city), city).await?;
        Ok(response.into_forecast(city))
    }
}

/// OpenWeatherMap response structures and conversion into internal models
mod wire {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub coord: CoordBlock,
        pub weather: Vec<ConditionBlock>,
        pub main: MainBlock,
        /// Visibility in meters
        pub visibility: Option<f32>,
        pub wind: Option<WindBlock>,
        pub clouds: Option<CloudsBlock>,
        pub rain: Option<PrecipitationBlock>,
        pub snow: Option<PrecipitationBlock>,
        pub dt: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CoordBlock {
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ConditionBlock {
        pub description: String,
        pub icon: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainBlock {
        pub temp: f32,
        pub feels_like: Option<f32>,
        pub pressure: Option<f32>,
        pub humidity: u16,
    }

    #[derive(Debug, Deserialize)]
    pub struct WindBlock {
        pub speed: f32,
        pub deg: Option<u16>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CloudsBlock {
        pub all: u16,
    }

    #[derive(Debug, Deserialize)]
    pub struct PrecipitationBlock {
        #[serde(rename = "1h")]
        pub one_hour: Option<f32>,
        #[serde(rename = "3h")]
        pub three_hours: Option<f32>,
    }

    impl PrecipitationBlock {
        fn amount(&self) -> Option<f32> {
            self.one_hour.or(self.three_hours)
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastItem>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastItem {
        pub dt: i64,
        pub main: MainBlock,
        pub weather: Vec<ConditionBlock>,
    }

    impl CurrentResponse {
        pub fn into_snapshot(self, city: &str) -> WeatherSnapshot {
            let (description, icon) = self
                .weather
                .into_iter()
                .next()
                .map(|c| (c.description, c.icon))
                .unwrap_or_else(|| ("unknown".to_string(), "01d".to_string()));

            // A wind reading needs both speed and direction; otherwise the
            // overlay skips the city.
            let wind = self
                .wind
                .and_then(|w| w.deg.map(|deg| WindReading::new(w.speed, deg)));

            let precipitation_mm = self
                .rain
                .as_ref()
                .and_then(PrecipitationBlock::amount)
                .or_else(|| self.snow.as_ref().and_then(PrecipitationBlock::amount));

            WeatherSnapshot {
                city: city.to_string(),
                coord: Coord {
                    latitude: self.coord.lat,
                    longitude: self.coord.lon,
                },
                temperature: self.main.temp,
                feels_like: self.main.feels_like.unwrap_or(self.main.temp),
                humidity: self.main.humidity.min(100) as u8,
                pressure: self.main.pressure.unwrap_or(1013.0),
                description,
                icon,
                wind,
                cloud_cover: self.clouds.map_or(0, |c| c.all.min(100) as u8),
                visibility_km: self.visibility.map_or(10.0, |v| v / 1000.0),
                precipitation_mm,
                observed_at: self
                    .dt
                    .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single())
                    .unwrap_or_else(Utc::now),
            }
            .normalized()
        }
    }

    impl ForecastResponse {
        pub fn into_forecast(self, city: &str) -> Forecast {
            let points = self
                .list
                .into_iter()
                .filter_map(|item| {
                    let timestamp = Utc.timestamp_opt(item.dt, 0).single()?;
                    let (description, icon) = item
                        .weather
                        .into_iter()
                        .next()
                        .map(|c| (c.description, c.icon))
                        .unwrap_or_else(|| ("unknown".to_string(), "01d".to_string()));
                    Some(ForecastPoint {
                        timestamp,
                        temperature: item.main.temp,
                        humidity: item.main.humidity.min(100) as u8,
                        description,
                        icon,
                    })
                })
                .collect();
            Forecast::new(city.to_string(), points)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let provider = OpenWeatherProvider::new(
            "https://api.openweathermap.org/data/2.5".to_string(),
            "key123".to_string(),
            30,
        )
        .unwrap();

        let url = provider.url("weather", "Beer Sheva");
        assert!(url.contains("/weather?"));
        assert!(url.contains("q=Beer%20Sheva%2CIL"));
        assert!(url.contains("units=metric"));
    }
}
