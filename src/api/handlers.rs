//! Example service endpoints.

use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{postgres::PgRow, Row};

use super::error::ApiError;
use super::routes::AppState;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);
const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    /// `connected` when a secret store is in use, `disabled` in environment-only mode
    pub vault: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    /// Rendered as stored: integer, UUID string or text
    pub id: Value,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentsResponse {
    pub assignments: Vec<Assignment>,
}

/// Non-sensitive runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub service_name: String,
    pub vault_addr: String,
    pub jwt_algorithm: String,
}

/// Health check endpoint
///
/// Returns 200 when the database answers within two seconds, 503 otherwise.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), ApiError> {
    let ping = sqlx::query("SELECT 1").execute(&state.pool);

    match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, ping).await {
        Ok(Ok(_)) => Ok((
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                database: "connected".to_string(),
                vault: state.vault_status.to_string(),
            }),
        )),
        Ok(Err(e)) => Err(ApiError::service_unavailable(format!("Health check failed: {}", e))),
        Err(_) => {
            Err(ApiError::service_unavailable("Health check failed: database ping timed out"))
        }
    }
}

/// First ten assignments
pub async fn list_assignments_handler(
    State(state): State<AppState>,
) -> Result<Json<AssignmentsResponse>, ApiError> {
    let query = sqlx::query("SELECT id, title FROM assignments LIMIT 10").fetch_all(&state.pool);

    let rows = tokio::time::timeout(QUERY_TIMEOUT, query)
        .await
        .map_err(|_| ApiError::internal("Assignment query timed out"))??;

    let assignments = rows.iter().map(assignment_from_row).collect::<Result<Vec<_>, _>>()?;

    Ok(Json(AssignmentsResponse { assignments }))
}

/// Configuration endpoint; never exposes secret values
pub async fn config_handler(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        service_name: state.service_name.clone(),
        vault_addr: state.vault_addr.clone(),
        jwt_algorithm: state.jwt_algorithm.clone(),
    })
}

fn assignment_from_row(row: &PgRow) -> Result<Assignment, sqlx::Error> {
    let id = if let Ok(id) = row.try_get::<i64, _>("id") {
        Value::from(id)
    } else if let Ok(id) = row.try_get::<i32, _>("id") {
        Value::from(id)
    } else if let Ok(id) = row.try_get::<uuid::Uuid, _>("id") {
        Value::from(id.to_string())
    } else {
        Value::from(row.try_get::<String, _>("id")?)
    };

    Ok(Assignment { id, title: row.try_get("title")? })
}
