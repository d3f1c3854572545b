//! Mezeg - bilingual weather dashboard for Israeli cities
//!
//! This library provides the core functionality for fetching current
//! conditions and forecasts, rendering map overlays and chart series,
//! and managing per-session favorites and city comparisons.

pub mod api;
pub mod charts;
pub mod cities;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod overlay;
pub mod session;
pub mod units;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::MezegConfig;
pub use error::MezegError;
pub use i18n::Language;
pub use models::{CityRecord, Forecast, ForecastPoint, WeatherSnapshot, WindReading};
pub use session::SessionStore;
pub use units::TemperatureUnit;
pub use weather::{MockProvider, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MezegError>;
