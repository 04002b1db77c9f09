use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use giftlist_db::PgHealth;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is up, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub updated_at: DateTime<Utc>,
    pub dependencies: Dependencies,
}

#[derive(Debug, Serialize)]
pub struct Dependencies {
    pub pg: PgHealth,
}

/// GET /health -- service and database health. Always answers 200.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let pg = match giftlist_db::pg_health(&state.pool, &state.config.database_name).await {
        Ok(pg) => pg,
        Err(e) => {
            tracing::warn!(error = %e, "Postgres health query failed");
            PgHealth::down()
        }
    };

    let status = if pg.is_up() { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        updated_at: Utc::now(),
        dependencies: Dependencies { pg },
    })
}

/// Mount health check routes at the root level.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
