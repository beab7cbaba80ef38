//! Operational routes: liveness, store readiness and build version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
}

impl Readiness {
    fn from_ping(reachable: bool) -> (StatusCode, Json<Readiness>) {
        if reachable {
            (StatusCode::OK, Json(Readiness { status: "ok", database: "ok" }))
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let ping = state.store.ping().await;
    if let Err(e) = &ping {
        tracing::warn!(error = %e, "store unreachable");
    }
    Readiness::from_ping(ping.is_ok())
}

async fn version() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
