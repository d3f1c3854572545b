//! HTTP API: router, handlers and response DTOs

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::charts::{self, ChartSeries, DailySummary};
use crate::config::MezegConfig;
use crate::i18n::{self, Language};
use crate::models::{CityRecord, Coord, WeatherSnapshot, WindReading};
use crate::overlay::{self, OverlayCity, OverlayFigure};
use crate::session::SessionStore;
use crate::units::TemperatureUnit;
use crate::weather::{self, WeatherProvider};
use crate::{MezegError, Result, cities};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
    pub sessions: SessionStore,
    pub default_city: String,
}

impl AppState {
    /// Build state from configuration (selects the weather provider)
    pub fn from_config(config: &MezegConfig) -> Result<Self> {
        Ok(Self {
            provider: weather::from_config(&config.weather)?,
            sessions: SessionStore::new(Duration::from_secs(
                u64::from(config.session.ttl_minutes) * 60,
            )),
            default_city: config.defaults.default_city.clone(),
        })
    }

    /// Build state around an explicit provider (used by tests)
    #[must_use]
    pub fn with_provider(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            sessions: SessionStore::new(Duration::from_secs(3600)),
            default_city: "Jerusalem".to_string(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/i18n", get(get_labels))
        .route("/cities", get(get_cities))
        .route("/weather/current", get(get_current))
        .route("/weather/forecast", get(get_forecast))
        .route("/compare", get(get_comparison))
        .route("/overlay", get(get_overlay))
        .route("/session", post(create_session))
        .route("/session/{id}/favorites", get(get_favorites))
        .route("/session/{id}/favorites/{city}", put(add_favorite))
        .route("/session/{id}/favorites/{city}", delete(remove_favorite))
        .route("/session/{id}/comparison", get(get_comparison_list))
        .route("/session/{id}/comparison/{city}", put(add_comparison_city))
        .route(
            "/session/{id}/comparison/{city}",
            delete(remove_comparison_city),
        )
        .with_state(state)
}

// --- error mapping -------------------------------------------------------

/// User-facing API error: one localized banner string per failure, with
/// the detailed cause logged rather than exposed.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(err: MezegError, lang: Language) -> Self {
        let status = match &err {
            MezegError::Validation { .. } => StatusCode::BAD_REQUEST,
            MezegError::UnknownCity { .. } | MezegError::Session { .. } => StatusCode::NOT_FOUND,
            MezegError::Api { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(error = %err, "request failed");
        Self {
            status,
            message: err.user_message(lang),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// --- query parameters ----------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: Option<String>,
    units: Option<String>,
    lang: Option<String>,
}

impl WeatherQuery {
    fn lang(&self) -> Language {
        self.lang.as_deref().map(Language::parse).unwrap_or_default()
    }

    fn units(&self) -> TemperatureUnit {
        self.units
            .as_deref()
            .map(TemperatureUnit::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct CompareQuery {
    cities: Option<String>,
    units: Option<String>,
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverlayQuery {
    cities: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

impl LangQuery {
    fn lang(&self) -> Language {
        self.lang.as_deref().map(Language::parse).unwrap_or_default()
    }
}

// --- response DTOs -------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCity {
    pub name: String,
    pub hebrew_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub major: bool,
}

impl From<&CityRecord> for ApiCity {
    fn from(record: &CityRecord) -> Self {
        Self {
            name: record.name.clone(),
            hebrew_name: record.hebrew_name.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            major: record.major,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiWind {
    pub speed_ms: f32,
    pub direction_deg: u16,
    pub cardinal: String,
}

impl From<&WindReading> for ApiWind {
    fn from(wind: &WindReading) -> Self {
        Self {
            speed_ms: wind.speed,
            direction_deg: wind.direction_deg,
            cardinal: wind.cardinal.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCurrentWeather {
    pub city: String,
    pub display_name: String,
    pub coord: Coord,
    /// Temperature in the requested unit
    pub temperature: f32,
    pub feels_like: f32,
    pub unit_symbol: String,
    pub humidity: u8,
    pub pressure: f32,
    pub description: String,
    pub conditions: String,
    pub icon: String,
    pub wind: Option<ApiWind>,
    pub cloud_cover: u8,
    pub visibility_km: f32,
    pub precipitation_mm: Option<f32>,
    pub observed_at: DateTime<Utc>,
}

impl ApiCurrentWeather {
    fn new(snapshot: &WeatherSnapshot, unit: TemperatureUnit, lang: Language) -> Self {
        let display_name = match lang {
            Language::English => snapshot.city.clone(),
            Language::Hebrew => cities::english_to_hebrew(&snapshot.city)
                .map_or_else(|| snapshot.city.clone(), String::from),
        };
        Self {
            city: snapshot.city.clone(),
            display_name,
            coord: snapshot.coord,
            temperature: unit.from_celsius(snapshot.temperature),
            feels_like: unit.from_celsius(snapshot.feels_like),
            unit_symbol: unit.symbol().to_string(),
            humidity: snapshot.humidity,
            pressure: snapshot.pressure,
            description: snapshot.description.clone(),
            conditions: snapshot.format_conditions(),
            icon: snapshot.icon.clone(),
            wind: snapshot.wind.as_ref().map(ApiWind::from),
            cloud_cover: snapshot.cloud_cover,
            visibility_km: snapshot.visibility_km,
            precipitation_mm: snapshot.precipitation_mm,
            observed_at: snapshot.observed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiForecastPoint {
    pub timestamp: DateTime<Utc>,
    /// Temperature in the requested unit
    pub temperature: f32,
    pub humidity: u8,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiForecast {
    pub city: String,
    pub unit_symbol: String,
    pub points: Vec<ApiForecastPoint>,
    pub temperature_series: ChartSeries,
    pub humidity_series: ChartSeries,
    pub daily: Vec<DailySummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiComparisonRow {
    pub city: String,
    pub display_name: String,
    pub temperature: f32,
    pub temperature_display: String,
    pub humidity: u8,
    pub humidity_display: String,
    pub conditions: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiComparison {
    pub unit_symbol: String,
    pub rows: Vec<ApiComparisonRow>,
    pub temperature_series: Vec<ChartSeries>,
    pub humidity_series: Vec<ChartSeries>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiSession {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiFavorites {
    pub favorites: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiComparisonList {
    pub cities: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealth {
    pub status: String,
    pub provider: String,
}

// --- handlers ------------------------------------------------------------

async fn health(State(state): State<AppState>) -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "ok".to_string(),
        provider: state.provider.name().to_string(),
    })
}

/// UI label keys the frontend renders; translations live server-side.
const LABEL_KEYS: &[&str] = &[
    "city",
    "date",
    "temperature",
    "humidity",
    "wind",
    "conditions",
    "celsius",
    "fahrenheit",
    "temperature_unit",
    "multi_city_comparison",
    "select_cities_to_compare",
    "add_city_to_compare",
    "add_city",
    "selected_cities",
    "current_weather_comparison",
    "temperature_comparison",
    "humidity_comparison",
    "five_day_temperature_forecast",
    "five_day_humidity_forecast",
    "five_day_forecast",
    "daily_details",
    "temperature_trend",
    "real_time_wind",
    "favorite_cities",
    "search_city",
    "no_matching_cities",
    "error_fetching_weather",
];

async fn get_labels(Query(query): Query<LangQuery>) -> Json<BTreeMap<&'static str, String>> {
    let lang = query.lang();
    Json(
        LABEL_KEYS
            .iter()
            .map(|key| (*key, i18n::translate(lang, key).to_string()))
            .collect(),
    )
}

async fn get_cities(Query(query): Query<SearchQuery>) -> Json<Vec<ApiCity>> {
    let records = match query.q.as_deref() {
        Some(q) => cities::search(q),
        None => cities::all().iter().collect(),
    };
    Json(records.into_iter().map(ApiCity::from).collect())
}

async fn get_current(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> std::result::Result<Json<ApiCurrentWeather>, ApiError> {
    let lang = query.lang();
    let city = requested_city(&query.city, &state).map_err(|e| ApiError::new(e, lang))?;

    let snapshot = state
        .provider
        .current_weather(&city)
        .await
        .map_err(|e| ApiError::new(e, lang))?;

    Ok(Json(ApiCurrentWeather::new(&snapshot, query.units(), lang)))
}

async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> std::result::Result<Json<ApiForecast>, ApiError> {
    let lang = query.lang();
    let unit = query.units();
    let city = requested_city(&query.city, &state).map_err(|e| ApiError::new(e, lang))?;

    let forecast = state
        .provider
        .forecast(&city)
        .await
        .map_err(|e| ApiError::new(e, lang))?;

    let points = forecast
        .points
        .iter()
        .map(|p| ApiForecastPoint {
            timestamp: p.timestamp,
            temperature: unit.from_celsius(p.temperature),
            humidity: p.humidity,
            description: p.description.clone(),
            icon: p.icon.clone(),
        })
        .collect();

    Ok(Json(ApiForecast {
        city: forecast.city.clone(),
        unit_symbol: unit.symbol().to_string(),
        temperature_series: charts::temperature_series(&forecast, unit),
        humidity_series: charts::humidity_series(&forecast),
        daily: charts::daily_summaries(&forecast, unit, lang),
        points,
    }))
}

async fn get_comparison(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> std::result::Result<Json<ApiComparison>, ApiError> {
    let lang = query.lang.as_deref().map(Language::parse).unwrap_or_default();
    let unit = query
        .units
        .as_deref()
        .map(TemperatureUnit::parse)
        .unwrap_or_default();

    let names: Vec<String> = query
        .cities
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if names.len() < crate::session::MIN_COMPARISON_CITIES
        || names.len() > crate::session::MAX_COMPARISON_CITIES
    {
        return Err(ApiError::new(
            MezegError::validation(format!(
                "comparison requires between {} and {} cities",
                crate::session::MIN_COMPARISON_CITIES,
                crate::session::MAX_COMPARISON_CITIES
            )),
            lang,
        ));
    }

    // One provider round-trip per city, sequential by design.
    let mut rows = Vec::with_capacity(names.len());
    let mut forecasts = Vec::with_capacity(names.len());
    for name in &names {
        let snapshot = state
            .provider
            .current_weather(name)
            .await
            .map_err(|e| ApiError::new(e, lang))?;
        let temperature = unit.from_celsius(snapshot.temperature);
        rows.push(ApiComparisonRow {
            display_name: match lang {
                Language::English => snapshot.city.clone(),
                Language::Hebrew => cities::english_to_hebrew(&snapshot.city)
                    .map_or_else(|| snapshot.city.clone(), String::from),
            },
            city: snapshot.city.clone(),
            temperature,
            temperature_display: format!("{temperature:.1}{}", unit.symbol()),
            humidity: snapshot.humidity,
            humidity_display: format!("{}%", snapshot.humidity),
            conditions: snapshot.format_conditions(),
        });

        let forecast = state
            .provider
            .forecast(name)
            .await
            .map_err(|e| ApiError::new(e, lang))?;
        forecasts.push(forecast);
    }

    Ok(Json(ApiComparison {
        unit_symbol: unit.symbol().to_string(),
        rows,
        temperature_series: charts::comparison_temperature_series(&forecasts, unit),
        humidity_series: charts::comparison_humidity_series(&forecasts),
    }))
}

async fn get_overlay(
    State(state): State<AppState>,
    Query(query): Query<OverlayQuery>,
) -> std::result::Result<Json<OverlayFigure>, ApiError> {
    let lang = Language::default();

    // Base layer: the major cities as markers.
    let mut overlay_cities: Vec<OverlayCity> =
        cities::major().map(OverlayCity::from_record).collect();

    // Wind arrows for the requested cities only, as in the original
    // single-city view where just the selected city carries wind.
    let requested: Vec<&str> = query
        .cities
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    for name in requested {
        let snapshot = state
            .provider
            .current_weather(name)
            .await
            .map_err(|e| ApiError::new(e, lang))?;

        if let Some(existing) = overlay_cities.iter_mut().find(|c| c.name == snapshot.city) {
            *existing = existing.clone().with_snapshot(&snapshot);
        } else if let Some(record) = cities::find(&snapshot.city) {
            overlay_cities.push(OverlayCity::from_record(record).with_snapshot(&snapshot));
        } else {
            // Off-table city: place it at the provider-reported coordinate.
            overlay_cities.push(OverlayCity {
                name: snapshot.city.clone(),
                hebrew_name: snapshot.city.clone(),
                coord: snapshot.coord,
                wind: snapshot.wind.clone(),
                precipitation_mm: snapshot.precipitation_mm,
            });
        }
    }

    Ok(Json(overlay::render_overlay(
        &overlay_cities,
        overlay::FRAME_COUNT,
    )))
}

async fn create_session(
    State(state): State<AppState>,
) -> std::result::Result<Json<ApiSession>, ApiError> {
    let session_id = state
        .sessions
        .create_session()
        .await
        .map_err(|e| ApiError::new(e, Language::default()))?;
    Ok(Json(ApiSession { session_id }))
}

async fn get_favorites(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> std::result::Result<Json<ApiFavorites>, ApiError> {
    let favorites = state
        .sessions
        .favorites(&id)
        .await
        .map_err(|e| ApiError::new(e, query.lang()))?;
    Ok(Json(ApiFavorites {
        favorites: favorites.into_iter().collect(),
    }))
}

async fn add_favorite(
    State(state): State<AppState>,
    Path((id, city)): Path<(String, String)>,
    Query(query): Query<LangQuery>,
) -> std::result::Result<Json<ApiFavorites>, ApiError> {
    let lang = query.lang();
    let record = known_city(&city).map_err(|e| ApiError::new(e, lang))?;
    let favorites = state
        .sessions
        .add_favorite(&id, &record.name)
        .await
        .map_err(|e| ApiError::new(e, lang))?;
    Ok(Json(ApiFavorites {
        favorites: favorites.into_iter().collect(),
    }))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path((id, city)): Path<(String, String)>,
    Query(query): Query<LangQuery>,
) -> std::result::Result<Json<ApiFavorites>, ApiError> {
    let lang = query.lang();
    let record = known_city(&city).map_err(|e| ApiError::new(e, lang))?;
    let favorites = state
        .sessions
        .remove_favorite(&id, &record.name)
        .await
        .map_err(|e| ApiError::new(e, lang))?;
    Ok(Json(ApiFavorites {
        favorites: favorites.into_iter().collect(),
    }))
}

async fn get_comparison_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> std::result::Result<Json<ApiComparisonList>, ApiError> {
    let cities = state
        .sessions
        .comparison(&id)
        .await
        .map_err(|e| ApiError::new(e, query.lang()))?;
    Ok(Json(ApiComparisonList { cities }))
}

async fn add_comparison_city(
    State(state): State<AppState>,
    Path((id, city)): Path<(String, String)>,
    Query(query): Query<LangQuery>,
) -> std::result::Result<Json<ApiComparisonList>, ApiError> {
    let lang = query.lang();
    let record = known_city(&city).map_err(|e| ApiError::new(e, lang))?;
    let cities = state
        .sessions
        .add_comparison_city(&id, &record.name)
        .await
        .map_err(|e| ApiError::new(e, lang))?;
    Ok(Json(ApiComparisonList { cities }))
}

async fn remove_comparison_city(
    State(state): State<AppState>,
    Path((id, city)): Path<(String, String)>,
    Query(query): Query<LangQuery>,
) -> std::result::Result<Json<ApiComparisonList>, ApiError> {
    let lang = query.lang();
    let record = known_city(&city).map_err(|e| ApiError::new(e, lang))?;
    let cities = state
        .sessions
        .remove_comparison_city(&id, &record.name)
        .await
        .map_err(|e| ApiError::new(e, lang))?;
    Ok(Json(ApiComparisonList { cities }))
}

// --- helpers -------------------------------------------------------------

fn requested_city(city: &Option<String>, state: &AppState) -> Result<String> {
    match city.as_deref().map(str::trim) {
        Some("") => Err(MezegError::validation("city cannot be empty")),
        Some(name) => Ok(name.to_string()),
        None => Ok(state.default_city.clone()),
    }
}

fn known_city(name: &str) -> Result<&'static CityRecord> {
    cities::find(name).ok_or_else(|| MezegError::UnknownCity {
        city: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_city_defaults() {
        let state = AppState::with_provider(Arc::new(weather::MockProvider::new()));
        assert_eq!(requested_city(&None, &state).unwrap(), "Jerusalem");
        assert_eq!(
            requested_city(&Some("Haifa".to_string()), &state).unwrap(),
            "Haifa"
        );
        assert!(requested_city(&Some("  ".to_string()), &state).is_err());
    }

    #[test]
    fn test_known_city_rejects_off_table_names() {
        assert!(known_city("Tel Aviv").is_ok());
        assert!(known_city("תל אביב").is_ok());
        assert!(known_city("Gotham").is_err());
    }

    #[test]
    fn test_api_city_from_record() {
        let record = cities::find("Eilat").unwrap();
        let api: ApiCity = record.into();
        assert_eq!(api.name, "Eilat");
        assert!(api.major);
    }
}
