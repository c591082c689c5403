//! Mapping of service errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stockroom_services::ItemBackendError;
use stockroom_weather::WeatherError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Items(#[from] ItemBackendError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Items(ItemBackendError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Items(ItemBackendError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Items(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Weather(WeatherError::CityNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Weather(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            // The city is echoed by the caller; keep the body stable.
            ApiError::Weather(WeatherError::CityNotFound(_)) => "City not found".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Responding with server error");
        } else {
            tracing::debug!(error = %self, "Responding with client error");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_error_status_codes() {
        assert_eq!(
            ApiError::from(ItemBackendError::NotFound(3)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ItemBackendError::validation("Name cannot be empty")).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_weather_error_status_codes() {
        assert_eq!(
            ApiError::from(WeatherError::Configuration).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(WeatherError::CityNotFound("Atlantis".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(WeatherError::MalformedResponse("empty".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::from(WeatherError::CityNotFound("Atlantis".into())).message(),
            "City not found"
        );
        assert_eq!(
            ApiError::from(WeatherError::Configuration).message(),
            "OpenWeather API key not configured"
        );
    }
}
