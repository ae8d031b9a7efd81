//! HTTP routes for the cityclock API.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use cityclock_core::{CityBundle, CityService, Health, ServiceError, TimeReading, WeatherReading};
use serde_json::json;

pub type AppState = Arc<CityService>;

/// JSON error body: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = self.0.public_message();

        if status.is_server_error() {
            tracing::error!("request failed: {:#}", anyhow::Error::new(self.0));
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }

        error_body(status, message)
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/api/time/{city}", get(time))
        .route("/api/weather/{city}", get(weather))
        .route("/api/cities", get(cities))
        .route("/api/health", get(health))
        .fallback(not_found)
        .with_state(service)
}

async fn time(
    State(service): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<TimeReading>, ApiError> {
    tracing::info!(%city, "time requested");
    Ok(Json(service.time(&city)?))
}

async fn weather(
    State(service): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReading>, ApiError> {
    tracing::info!(%city, "weather requested");
    Ok(Json(service.weather(&city).await?))
}

async fn cities(State(service): State<AppState>) -> Result<Json<Vec<CityBundle>>, ApiError> {
    tracing::info!("all cities requested");
    Ok(Json(service.cities().await?))
}

async fn health(State(service): State<AppState>) -> Json<Health> {
    tracing::debug!("health check");
    Json(service.health())
}

async fn not_found() -> Response {
    error_body(StatusCode::NOT_FOUND, "Not found")
}
