use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::errors::Error;

#[derive(Debug)]
pub enum ApiError {
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn service_unavailable<S: Into<String>>(msg: S) -> Self {
        ApiError::ServiceUnavailable(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        ApiError::Internal(msg.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let (error_kind, message) = match self {
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg),
            ApiError::Internal(msg) => ("internal_error", msg),
        };

        tracing::warn!(
            status = status.as_u16(),
            error = error_kind,
            detail = %message,
            "Request error"
        );

        (status, Json(ErrorBody { error: error_kind, message })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Error::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_body_shape() {
        let response =
            ApiError::service_unavailable("Health check failed: timeout").into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "service_unavailable");
        assert_eq!(json["message"], "Health check failed: timeout");
    }

    #[test]
    fn test_database_error_maps_to_internal() {
        let err: ApiError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
