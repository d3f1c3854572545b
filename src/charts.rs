//! Chart and table data preparation
//!
//! Turns forecasts into the series the frontend plots and the per-day
//! summary cards it renders, with unit conversion and localized date
//! labels applied server-side.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::i18n::{self, Language};
use crate::models::Forecast;
use crate::units::TemperatureUnit;

/// One point of a line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f32,
}

/// A labeled line-chart series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series label (the city name for comparison charts)
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

/// One daily detail card: per-day means with a localized date label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// e.g. "Monday, June 02" or "יום שני, יוני 02"
    pub label: String,
    pub temperature: f32,
    pub humidity: f32,
}

/// Temperature series for one forecast, converted to the requested unit
#[must_use]
pub fn temperature_series(forecast: &Forecast, unit: TemperatureUnit) -> ChartSeries {
    ChartSeries {
        label: forecast.city.clone(),
        points: forecast
            .points
            .iter()
            .map(|p| SeriesPoint {
                timestamp: p.timestamp,
                value: unit.from_celsius(p.temperature),
            })
            .collect(),
    }
}

/// Humidity series for one forecast
#[must_use]
pub fn humidity_series(forecast: &Forecast) -> ChartSeries {
    ChartSeries {
        label: forecast.city.clone(),
        points: forecast
            .points
            .iter()
            .map(|p| SeriesPoint {
                timestamp: p.timestamp,
                value: f32::from(p.humidity),
            })
            .collect(),
    }
}

/// One temperature series per city for the comparison chart
#[must_use]
pub fn comparison_temperature_series(
    forecasts: &[Forecast],
    unit: TemperatureUnit,
) -> Vec<ChartSeries> {
    forecasts
        .iter()
        .map(|f| temperature_series(f, unit))
        .collect()
}

/// One humidity series per city for the comparison chart
#[must_use]
pub fn comparison_humidity_series(forecasts: &[Forecast]) -> Vec<ChartSeries> {
    forecasts.iter().map(humidity_series).collect()
}

/// Per-day mean temperature and humidity, one card per forecast date
#[must_use]
pub fn daily_summaries(
    forecast: &Forecast,
    unit: TemperatureUnit,
    lang: Language,
) -> Vec<DailySummary> {
    forecast
        .dates()
        .into_iter()
        .filter_map(|date| {
            let points = forecast.points_for_date(date);
            if points.is_empty() {
                return None;
            }
            let n = points.len() as f32;
            let temperature = points.iter().map(|p| p.temperature).sum::<f32>() / n;
            let humidity = points.iter().map(|p| f32::from(p.humidity)).sum::<f32>() / n;
            Some(DailySummary {
                date,
                label: date_label(date, lang),
                temperature: unit.from_celsius(temperature),
                humidity,
            })
        })
        .collect()
}

/// Localized "weekday, month day" label for the daily cards
#[must_use]
pub fn date_label(date: NaiveDate, lang: Language) -> String {
    format!(
        "{}, {} {:02}",
        i18n::weekday_name(lang, date.weekday()),
        i18n::month_name(lang, date.month()),
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastPoint;
    use chrono::TimeZone;

    fn forecast() -> Forecast {
        let points = (0..4)
            .map(|i| ForecastPoint {
                timestamp: Utc.with_ymd_and_hms(2025, 6, 1 + i / 2, 6 + 12 * (i % 2), 0, 0).unwrap(),
                temperature: 20.0 + i as f32,
                humidity: 50 + 10 * i as u8,
                description: "few clouds".to_string(),
                icon: "02d".to_string(),
            })
            .collect();
        Forecast::new("Jerusalem".to_string(), points)
    }

    #[test]
    fn test_temperature_series_converts_units() {
        let forecast = forecast();
        let celsius = temperature_series(&forecast, TemperatureUnit::Celsius);
        let fahrenheit = temperature_series(&forecast, TemperatureUnit::Fahrenheit);

        assert_eq!(celsius.label, "Jerusalem");
        assert_eq!(celsius.points[0].value, 20.0);
        assert_eq!(fahrenheit.points[0].value, 68.0);
    }

    #[test]
    fn test_daily_summaries_are_per_day_means() {
        let forecast = forecast();
        let days = daily_summaries(&forecast, TemperatureUnit::Celsius, Language::English);

        assert_eq!(days.len(), 2);
        // June 1st has points at 20.0 and 21.0 degrees.
        assert!((days[0].temperature - 20.5).abs() < 1e-5);
        assert!((days[0].humidity - 55.0).abs() < 1e-5);
        assert_eq!(days[0].label, "Sunday, June 01");
    }

    #[test]
    fn test_date_label_hebrew() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(
            date_label(date, Language::Hebrew),
            "יום שני, יוני 02"
        );
    }

    #[test]
    fn test_comparison_series_one_per_city() {
        let forecasts = vec![forecast(), {
            let mut other = forecast();
            other.city = "Haifa".to_string();
            other
        }];
        let series = comparison_temperature_series(&forecasts, TemperatureUnit::Celsius);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].label, "Haifa");

        let humidity = comparison_humidity_series(&forecasts);
        assert_eq!(humidity[0].points[0].value, 50.0);
    }
}
