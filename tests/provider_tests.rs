//! Wire-format tests for the HTTP weather backends, served by wiremock

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mezeg::MezegError;
use mezeg::weather::{OpenWeatherProvider, WeatherApiProvider, WeatherProvider};

fn weatherapi(server: &MockServer) -> WeatherApiProvider {
    WeatherApiProvider::new(server.uri(), "test-key".to_string(), 5, 5).unwrap()
}

fn openweather(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new(server.uri(), "test-key".to_string(), 5).unwrap()
}

#[tokio::test]
async fn test_weatherapi_current_is_adapted_to_metric() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "Jerusalem,Israel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "lat": 31.78, "lon": 35.22 },
            "current": {
                "temp_c": 28.3,
                "feelslike_c": 27.1,
                "humidity": 41,
                "pressure_mb": 1009.0,
                "wind_kph": 18.0,
                "wind_degree": 270,
                "cloud": 25,
                "vis_km": 10.0,
                "precip_mm": 0.0,
                "condition": { "text": "Partly cloudy" },
                "last_updated_epoch": 1_750_000_000
            }
        })))
        .mount(&server)
        .await;

    let snapshot = weatherapi(&server).current_weather("Jerusalem").await.unwrap();
    assert_eq!(snapshot.city, "Jerusalem");
    assert_eq!(snapshot.temperature, 28.3);
    assert_eq!(snapshot.description, "partly cloudy");
    assert_eq!(snapshot.icon, "02d");
    let wind = snapshot.wind.unwrap();
    // 18 kph is 5 m/s
    assert!((wind.speed - 5.0).abs() < 0.01);
    assert_eq!(wind.cardinal, "W");
    // No rain fell, so no precipitation is reported.
    assert_eq!(snapshot.precipitation_mm, None);
}

#[tokio::test]
async fn test_weatherapi_hebrew_city_is_queried_in_english() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "Haifa,Israel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "lat": 32.79, "lon": 34.99 },
            "current": {
                "temp_c": 24.0,
                "feelslike_c": 24.0,
                "humidity": 60,
                "pressure_mb": 1013.0,
                "wind_kph": 10.0,
                "wind_degree": 90,
                "cloud": 0,
                "vis_km": 10.0,
                "precip_mm": 1.2,
                "condition": { "text": "Light rain" }
            }
        })))
        .mount(&server)
        .await;

    let snapshot = weatherapi(&server).current_weather("חיפה").await.unwrap();
    assert_eq!(snapshot.city, "Haifa");
    assert_eq!(snapshot.precipitation_mm, Some(1.2));
    assert_eq!(snapshot.icon, "10d");
}

#[tokio::test]
async fn test_weatherapi_forecast_flattens_hourly_blocks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("days", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "forecast": {
                "forecastday": [
                    {
                        "hour": [
                            {
                                "time_epoch": 1_750_000_000,
                                "temp_c": 22.0,
                                "humidity": 55,
                                "condition": { "text": "Sunny" }
                            },
                            {
                                "time_epoch": 1_750_010_800,
                                "temp_c": 26.5,
                                "humidity": 48,
                                "condition": { "text": "Clear" }
                            }
                        ]
                    },
                    {
                        "hour": [
                            {
                                "time_epoch": 1_750_086_400,
                                "temp_c": 24.0,
                                "humidity": 50,
                                "condition": { "text": "Overcast" }
                            }
                        ]
                    }
                ]
            }
        })))
        .mount(&server)
        .await;

    let forecast = weatherapi(&server).forecast("Eilat").await.unwrap();
    assert_eq!(forecast.city, "Eilat");
    assert_eq!(forecast.points.len(), 3);
    assert_eq!(forecast.points[0].temperature, 22.0);
    assert_eq!(forecast.points[2].icon, "04d");
}

#[tokio::test]
async fn test_weatherapi_error_status_collapses_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_string(r#"{"error":{"code":2008,"message":"API key disabled"}}"#),
        )
        .mount(&server)
        .await;

    let err = weatherapi(&server).current_weather("Jerusalem").await.unwrap_err();
    match err {
        MezegError::Api { message } => {
            assert!(message.contains("Jerusalem"));
            assert!(message.contains("403"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_openweather_current_with_rain_and_wind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Tel Aviv,IL"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": { "lat": 32.08, "lon": 34.78 },
            "weather": [ { "description": "moderate rain", "icon": "10d" } ],
            "main": { "temp": 19.5, "feels_like": 19.0, "pressure": 1011, "humidity": 83 },
            "visibility": 8000,
            "wind": { "speed": 6.2, "deg": 200 },
            "clouds": { "all": 90 },
            "rain": { "1h": 2.4 },
            "dt": 1_750_000_000
        })))
        .mount(&server)
        .await;

    let snapshot = openweather(&server).current_weather("Tel Aviv").await.unwrap();
    assert_eq!(snapshot.temperature, 19.5);
    assert_eq!(snapshot.humidity, 83);
    assert_eq!(snapshot.visibility_km, 8.0);
    assert_eq!(snapshot.precipitation_mm, Some(2.4));
    let wind = snapshot.wind.unwrap();
    assert_eq!(wind.direction_deg, 200);
    assert_eq!(wind.cardinal, "S");
}

#[tokio::test]
async fn test_openweather_missing_wind_direction_drops_reading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": { "lat": 31.25, "lon": 34.79 },
            "weather": [ { "description": "clear sky", "icon": "01d" } ],
            "main": { "temp": 31.0, "humidity": 120 },
            "wind": { "speed": 3.0 }
        })))
        .mount(&server)
        .await;

    let snapshot = openweather(&server).current_weather("Beer Sheva").await.unwrap();
    assert!(snapshot.wind.is_none());
    // Out-of-range humidity is clamped, defaults fill the gaps.
    assert_eq!(snapshot.humidity, 100);
    assert_eq!(snapshot.pressure, 1013.0);
    assert_eq!(snapshot.visibility_km, 10.0);
}

#[tokio::test]
async fn test_openweather_forecast_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [
                {
                    "dt": 1_750_010_800,
                    "main": { "temp": 27.0, "humidity": 45 },
                    "weather": [ { "description": "few clouds", "icon": "02d" } ]
                },
                {
                    "dt": 1_750_000_000,
                    "main": { "temp": 23.0, "humidity": 52 },
                    "weather": [ { "description": "clear sky", "icon": "01n" } ]
                }
            ]
        })))
        .mount(&server)
        .await;

    let forecast = openweather(&server).forecast("Netanya").await.unwrap();
    // Points come back ordered by timestamp regardless of wire order.
    assert_eq!(forecast.points.len(), 2);
    assert!(forecast.points[0].timestamp < forecast.points[1].timestamp);
    assert_eq!(forecast.points[0].icon, "01n");
}

#[tokio::test]
async fn test_malformed_body_collapses_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = openweather(&server).current_weather("Jerusalem").await.unwrap_err();
    assert!(matches!(err, MezegError::Api { .. }));
}
