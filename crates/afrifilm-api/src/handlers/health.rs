//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use afrifilm_cache::keys;
use afrifilm_core::traits::CacheProvider;

use crate::dto::response::{HealthResponse, ReadinessResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/ready
///
/// 503 unless the database and the cache both answer.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(true) => "connected",
            Ok(false) | Err(_) => "unavailable",
        },
        None => "memory",
    };

    let cache = if cache_round_trip(&state).await {
        "connected"
    } else {
        "unavailable"
    };

    let ok = database != "unavailable" && cache != "unavailable";
    if !ok {
        tracing::warn!(database, cache, "Readiness check failed");
    }

    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(ReadinessResponse {
            status: if ok { "ready" } else { "degraded" }.to_string(),
            database: database.to_string(),
            cache: cache.to_string(),
        }),
    )
}

/// Write the probe key and read it back.
async fn cache_round_trip(state: &AppState) -> bool {
    let key = keys::readiness_probe();
    if state.cache.set_default(&key, "ok").await.is_err() {
        return false;
    }
    matches!(state.cache.get(&key).await, Ok(Some(v)) if v == "ok")
}
