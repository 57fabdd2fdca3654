use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::routes::dated;
use crate::services::DashboardService;
use crate::services::context::RequestContext;

pub async fn get_kpis(State(state): State<Arc<AppState>>, ctx: RequestContext) -> impl IntoResponse {
    match DashboardService::kpis(state.store.as_ref(), &state.cache, &ctx).await {
        Ok(kpis) => {
            let response = ApiResponse::success_with_meta(kpis, "Dashboard KPIs computed", dated(&ctx, None));
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_entity_rollups(State(state): State<Arc<AppState>>, ctx: RequestContext) -> impl IntoResponse {
    match DashboardService::entities(state.store.as_ref(), &state.cache, &ctx).await {
        Ok(rollups) => {
            let response = ApiResponse::success_with_meta(rollups, "Entity utilization computed", dated(&ctx, None));
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
