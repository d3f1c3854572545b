//! Data models for the weather dashboard

pub mod city;
pub mod forecast;
pub mod snapshot;

pub use city::CityRecord;
pub use forecast::{Forecast, ForecastPoint};
pub use snapshot::{Coord, WeatherSnapshot, WindReading};
