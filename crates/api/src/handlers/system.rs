//! Health report, liveness ping and demo-data seeding.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Object storage provider in use (`local`, `s3`).
    pub storage: &'static str,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = programs_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage: state.programs.storage_provider(),
    })
}

/// GET /api/v1/test
pub async fn ping() -> &'static str {
    "OK"
}

/// POST /api/v1/test/init
pub async fn init_data(State(state): State<AppState>) -> AppResult<StatusCode> {
    programs_db::seed::seed_demo_programs(&state.pool).await?;
    Ok(StatusCode::NO_CONTENT)
}
