//! Forecast model: an ordered sequence of timestamped predictions

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped prediction in a multi-day sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Prediction timestamp
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f32,
    /// Relative humidity percentage, clamped to [0, 100]
    pub humidity: u8,
    /// Human-readable condition description
    pub description: String,
    /// Icon code from the fixed `01d`..`50n` set
    pub icon: String,
}

/// 5-day forecast for one city. Held only for the duration of a request,
/// never persisted across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    /// Canonical English city name
    pub city: String,
    /// Forecast points sorted by timestamp
    pub points: Vec<ForecastPoint>,
    /// When this forecast was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl Forecast {
    /// Create a forecast, sorting points by timestamp and clamping humidity
    #[must_use]
    pub fn new(city: String, mut points: Vec<ForecastPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        for point in &mut points {
            point.humidity = point.humidity.min(100);
        }
        Self {
            city,
            points,
            retrieved_at: Utc::now(),
        }
    }

    /// Distinct forecast dates, in order
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .points
            .iter()
            .map(|p| p.timestamp.date_naive())
            .collect();
        dates.dedup();
        dates
    }

    /// All points falling on the given date
    #[must_use]
    pub fn points_for_date(&self, date: NaiveDate) -> Vec<&ForecastPoint> {
        self.points
            .iter()
            .filter(|p| p.timestamp.date_naive() == date)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(ts: DateTime<Utc>, temperature: f32) -> ForecastPoint {
        ForecastPoint {
            timestamp: ts,
            temperature,
            humidity: 55,
            description: "few clouds".to_string(),
            icon: "02d".to_string(),
        }
    }

    #[test]
    fn test_points_sorted_on_construction() {
        let day1 = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();

        let forecast = Forecast::new(
            "Haifa".to_string(),
            vec![point(day2, 30.0), point(day1, 24.0)],
        );
        assert_eq!(forecast.points[0].temperature, 24.0);
        assert_eq!(forecast.points[1].temperature, 30.0);
    }

    #[test]
    fn test_dates_and_points_for_date() {
        let day1 = Utc.with_ymd_and_hms(2025, 6, 1, 6, 0, 0).unwrap();
        let day1_later = Utc.with_ymd_and_hms(2025, 6, 1, 15, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2025, 6, 2, 6, 0, 0).unwrap();

        let forecast = Forecast::new(
            "Eilat".to_string(),
            vec![point(day1, 32.0), point(day1_later, 38.0), point(day2, 33.0)],
        );

        assert_eq!(forecast.dates().len(), 2);
        assert_eq!(forecast.points_for_date(day1.date_naive()).len(), 2);
        assert_eq!(forecast.points_for_date(day2.date_naive()).len(), 1);
    }

    #[test]
    fn test_humidity_clamped() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 6, 0, 0).unwrap();
        let mut p = point(ts, 20.0);
        p.humidity = 250;
        let forecast = Forecast::new("Lod".to_string(), vec![p]);
        assert_eq!(forecast.points[0].humidity, 100);
    }
}
