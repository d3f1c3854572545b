//! Weather data accessor
//!
//! One provider is selected at startup: WeatherAPI.com when its key is
//! configured, OpenWeatherMap as the second choice, and the mock generator
//! when no credential exists. Both HTTP backends normalize into the same
//! snapshot/forecast shape. Failures are surfaced immediately as a single
//! `Api` error carrying the upstream status and message; there is no retry,
//! backoff or caching of prior results.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::WeatherConfig;
use crate::models::{Forecast, WeatherSnapshot};
use crate::{MezegError, Result};

pub mod mock;
pub mod openweather;
pub mod weatherapi;

pub use mock::MockProvider;
pub use openweather::OpenWeatherProvider;
pub use weatherapi::WeatherApiProvider;

/// Provider seam for the weather data accessor
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short provider name for logs and the health endpoint
    fn name(&self) -> &'static str;

    /// Current weather for a city (English or Hebrew name)
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot>;

    /// 5-day forecast for a city (English or Hebrew name)
    async fn forecast(&self, city: &str) -> Result<Forecast>;
}

/// Select and construct the provider for the given configuration
pub fn from_config(config: &WeatherConfig) -> Result<Arc<dyn WeatherProvider>> {
    if let Some(key) = &config.weatherapi_key {
        tracing::info!("using WeatherAPI.com provider");
        return Ok(Arc::new(WeatherApiProvider::new(
            config.weatherapi_base_url.clone(),
            key.clone(),
            config.timeout_seconds,
            config.forecast_days,
        )?));
    }
    if let Some(key) = &config.openweather_key {
        tracing::info!("using OpenWeatherMap provider");
        return Ok(Arc::new(OpenWeatherProvider::new(
            config.openweather_base_url.clone(),
            key.clone(),
            config.timeout_seconds,
        )?));
    }
    tracing::warn!("no weather API key configured, falling back to mock data");
    Ok(Arc::new(MockProvider::new()))
}

pub(crate) fn http_client(timeout_seconds: u32) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(u64::from(timeout_seconds)))
        .build()
        .map_err(|e| MezegError::api(format!("Failed to build HTTP client: {e}")))
}

/// Issue a GET and decode the JSON body, collapsing every failure mode into
/// one `Api` error that carries the upstream status and message.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
    city: &str,
) -> Result<T> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MezegError::api(format!("Failed to fetch weather data for {city}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MezegError::api(format!(
            "Failed to fetch weather data for {city}: HTTP {status}: {body}"
        )));
    }

    response.json::<T>().await.map_err(|e| {
        MezegError::api(format!("Failed to parse weather response for {city}: {e}"))
    })
}
