use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use crate::cache::redis::health_check;
use crate::db::models::api::ApiResponse;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub cache_mirror: &'static str,
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cache_mirror = match &state.redis {
        None => "disabled",
        Some(client) => match health_check(client).await {
            Ok(true) => "ok",
            Ok(false) => "unavailable",
            Err(e) => {
                tracing::warn!(error = %e, "cache mirror health check failed");
                "unavailable"
            }
        },
    };
    let body = HealthStatus {
        status: "ok",
        cache_mirror,
    };
    (StatusCode::OK, Json(ApiResponse::success(body, "Service is healthy")))
}
