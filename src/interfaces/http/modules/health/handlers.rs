//! Liveness probe

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use tracing::warn;

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: StoreHealth,
}

#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub status: &'static str,
    pub latency_ms: Option<u64>,
}

/// Round-trip a trivial query through the pool.
async fn ping_store(db: &DatabaseConnection) -> StoreHealth {
    let started = Instant::now();
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    match db.execute(ping).await {
        Ok(_) => StoreHealth {
            status: "ok",
            latency_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(e) => {
            warn!("Health check could not reach the store: {}", e);
            StoreHealth {
                status: "error",
                latency_ms: None,
            }
        }
    }
}

/// `GET /health`: `200` with `ok`, or `503` with `degraded` when the store
/// does not answer.
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ping_store(&state.db).await;
    let healthy = database.latency_ms.is_some();

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database,
    };
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(body))
}
