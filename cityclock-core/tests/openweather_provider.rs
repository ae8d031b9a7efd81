//! OpenWeather contract tests against a local mock server.

use cityclock_core::{
    CityRegistry, CityService, Config, Coordinates, ServiceError, TimeResolver, WeatherMode,
    WeatherResolver,
    provider::{WeatherProvider, openweather::OpenWeatherProvider},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn payload(temp: f64, feels_like: f64) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 13.405, "lat": 52.52},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04n"}],
        "main": {"temp": temp, "feels_like": feels_like, "pressure": 1021, "humidity": 71},
        "wind": {"speed": 4.12, "deg": 250},
        "name": "Berlin"
    })
}

fn live_service(server: &MockServer, registry: CityRegistry) -> CityService {
    let mode = WeatherMode::Live {
        api_key: "TEST_KEY".into(),
        base_url: server.uri(),
    };
    CityService::new(
        registry,
        TimeResolver::system(),
        WeatherResolver::from_mode(&mode).unwrap(),
        mode,
    )
}

#[tokio::test]
async fn sends_coordinates_key_and_metric_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "52.52"))
        .and(query_param("lon", "13.405"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(3.5, -0.51)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new("TEST_KEY".into(), server.uri()).unwrap();
    let obs = provider
        .current(Coordinates { lat: 52.52, lon: 13.405 })
        .await
        .unwrap();

    assert_eq!(obs.temperature, 4);
    assert_eq!(obs.feels_like, -1);
    assert_eq!(obs.description, "broken clouds");
    assert_eq!(obs.icon, "04n");
    assert_eq!(obs.humidity, 71);
    assert_eq!(obs.wind_speed, 4.12);
    assert_eq!(obs.pressure, Some(1021));
}

#[tokio::test]
async fn live_weather_reading_carries_city_labels_and_pressure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(21.7, 22.2)))
        .mount(&server)
        .await;

    let svc = live_service(&server, CityRegistry::builtin());
    let reading = svc.weather("Berlin").await.unwrap();

    let json = serde_json::to_value(&reading).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "city": "Berlin",
            "country": "Germany",
            "temperature": 22,
            "description": "broken clouds",
            "humidity": 71,
            "windSpeed": 4.12,
            "icon": "04n",
            "feelsLike": 22,
            "pressure": 1021
        })
    );
}

#[tokio::test]
async fn non_success_status_is_a_hard_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"cod": 401, "message": "Invalid API key"})),
        )
        .mount(&server)
        .await;

    let svc = live_service(&server, CityRegistry::builtin());
    let err = svc.weather("toronto").await.unwrap_err();

    assert!(matches!(err, ServiceError::WeatherProvider(_)));
    assert_eq!(err.status(), 500);
    let cause = std::error::Error::source(&err).expect("provider error has a cause");
    assert!(cause.to_string().contains("401"));
}

#[tokio::test]
async fn malformed_payload_is_a_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let svc = live_service(&server, CityRegistry::builtin());
    let err = svc.weather("kualalumpur").await.unwrap_err();

    assert!(matches!(err, ServiceError::WeatherProvider(_)));
}

#[tokio::test]
async fn unreachable_provider_is_a_provider_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let provider = OpenWeatherProvider::new("KEY".into(), uri).unwrap();
    let err = provider
        .current(Coordinates { lat: 0.0, lon: 0.0 })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to send request to OpenWeather"));
}

#[tokio::test]
async fn failed_request_does_not_leak_api_key() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let mode = WeatherMode::Live { api_key: "SUPERSECRET123".into(), base_url: uri };
    let resolver = WeatherResolver::from_mode(&mode).unwrap();
    let err = resolver
        .resolve(Coordinates { lat: 1.0, lon: 2.0 })
        .await
        .unwrap_err();

    let chain = format!("{:#}", anyhow::Error::new(err));
    assert!(chain.contains("Failed to send request to OpenWeather"), "{chain}");
    assert!(!chain.contains("SUPERSECRET123"), "{chain}");
    assert!(!chain.contains("appid"), "{chain}");
}

#[tokio::test]
async fn aggregate_fails_when_provider_fails_for_one_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "43.6532"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(10.0, 9.0)))
        .mount(&server)
        .await;

    let svc = live_service(&server, CityRegistry::builtin());
    let err = svc.cities().await.unwrap_err();

    match err {
        ServiceError::Aggregation { city, .. } => assert_eq!(city, "toronto"),
        other => panic!("expected aggregation error, got {other:?}"),
    }
}

#[tokio::test]
async fn config_with_base_url_points_service_at_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(15.0, 14.0)))
        .expect(3)
        .mount(&server)
        .await;

    let uri = server.uri();
    let config = Config::default()
        .with_env(|name| match name {
            "OPENWEATHER_API_KEY" => Some("KEY".to_string()),
            "OPENWEATHER_BASE_URL" => Some(uri.clone()),
            _ => None,
        })
        .unwrap();

    let svc = CityService::from_config(&config).unwrap();
    let bundles = svc.cities().await.unwrap();

    assert_eq!(bundles.len(), 3);
    assert!(bundles.iter().all(|b| b.weather.temperature == 15));
    assert!(bundles.iter().all(|b| b.weather.pressure == Some(1021)));
}
