//! WeatherAPI.com backend
//!
//! Responses are adapted to the same normalized shape the OpenWeatherMap
//! backend produces: condition text is mapped to an icon code, wind kph is
//! converted to m/s and precipitation is only reported when any fell.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use tracing::instrument;

use crate::models::{Coord, Forecast, ForecastPoint, WeatherSnapshot, WindReading};
use crate::weather::{WeatherProvider, get_json, http_client};
use crate::{Result, cities, units};

pub struct WeatherApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    forecast_days: u8,
}

impl WeatherApiProvider {
    pub fn new(
        base_url: String,
        api_key: String,
        timeout_seconds: u32,
        forecast_days: u8,
    ) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout_seconds)?,
            base_url,
            api_key,
            forecast_days,
        })
    }

    fn current_url(&self, city: &str) -> String {
        format!(
            "{}/current.json?key={}&q={}&aqi=no",
            self.base_url,
            self.api_key,
            urlencoding::encode(&format!("{city},Israel"))
        )
    }

    fn forecast_url(&self, city: &str) -> String {
        format!(
            "{}/forecast.json?key={}&q={}&days={}&aqi=no&alerts=no",
            self.base_url,
            self.api_key,
            urlencoding::encode(&format!("{city},Israel")),
            self.forecast_days
        )
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn name(&self) -> &'static str {
        "weatherapi"
    }

    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let city = cities::query_name(city);
        let response: wire::CurrentResponse =
            get_json(&self.client, &self.current_url(city), city).await?;
        Ok(response.into_snapshot(city))
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Forecast> {
        let city = cities::query_name(city);
        let response: wire::ForecastResponse =
            get_json(&self.client, &self.forecast_url(city), city).await?;
        Ok(response.into_forecast(city))
    }
}

/// WeatherAPI.com response structures and conversion into internal models
mod wire {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub location: LocationBlock,
        pub current: CurrentBlock,
    }

    #[derive(Debug, Deserialize)]
    pub struct LocationBlock {
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentBlock {
        pub temp_c: f32,
        pub feelslike_c: f32,
        pub humidity: u16,
        pub pressure_mb: f32,
        pub wind_kph: f32,
        pub wind_degree: u16,
        pub cloud: u16,
        pub vis_km: f32,
        pub precip_mm: f32,
        pub condition: Condition,
        pub last_updated_epoch: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub text: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub forecast: ForecastBlock,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastBlock {
        #[serde(rename = "forecastday")]
        pub days: Vec<ForecastDay>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastDay {
        pub hour: Vec<HourBlock>,
    }

    #[derive(Debug, Deserialize)]
    pub struct HourBlock {
        pub time_epoch: i64,
        pub temp_c: f32,
        pub humidity: u16,
        pub condition: Condition,
    }

    impl CurrentResponse {
        pub fn into_snapshot(self, city: &str) -> WeatherSnapshot {
            let description = self.current.condition.text.to_lowercase();
            let icon = units::icon_for_condition(&description).to_string();
            let observed_at = self
                .current
                .last_updated_epoch
                .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single())
                .unwrap_or_else(Utc::now);

            WeatherSnapshot {
                city: city.to_string(),
                coord: Coord {
                    latitude: self.location.lat,
                    longitude: self.location.lon,
                },
                temperature: self.current.temp_c,
                feels_like: self.current.feelslike_c,
                humidity: self.current.humidity.min(100) as u8,
                pressure: self.current.pressure_mb,
                description,
                icon,
                // kph on the wire, m/s internally
                wind: Some(WindReading::new(
                    self.current.wind_kph / 3.6,
                    self.current.wind_degree,
                )),
                cloud_cover: self.current.cloud.min(100) as u8,
                visibility_km: self.current.vis_km,
                precipitation_mm: (self.current.precip_mm > 0.0).then_some(self.current.precip_mm),
                observed_at,
            }
            .normalized()
        }
    }

    impl ForecastResponse {
        pub fn into_forecast(self, city: &str) -> Forecast {
            let points = self
                .forecast
                .days
                .into_iter()
                .flat_map(|day| day.hour)
                .filter_map(|hour| {
                    let timestamp = Utc.timestamp_opt(hour.time_epoch, 0).single()?;
                    let description = hour.condition.text.to_lowercase();
                    let icon = units::icon_for_condition(&description).to_string();
                    Some(ForecastPoint {
                        timestamp,
                        temperature: hour.temp_c,
                        humidity: hour.humidity.min(100) as u8,
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
    fn test_url_building_encodes_city() {
        let provider = WeatherApiProvider::new(
            "https://api.weatherapi.com/v1".to_string(),
            "key123".to_string(),
            30,
            5,
        )
        .unwrap();

        let url = provider.current_url("Tel Aviv");
        assert!(url.contains("current.json"));
        assert!(url.contains("q=Tel%20Aviv%2CIsrael"));

        let url = provider.forecast_url("Haifa");
        assert!(url.contains("days=5"));
        assert!(url.contains("alerts=no"));
    }
}
