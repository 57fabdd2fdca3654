use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::allocation::{
    AllocationQuery, CreateAllocationRequest, ReleaseAllocationRequest, UpdateAllocationRequest,
};
use crate::db::models::api::{ApiResponse, ResponseMeta};
use crate::services::AllocationsService;
use crate::services::context::RequestContext;
use crate::validation::ValidatedJson;

pub async fn get_allocations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AllocationQuery>,
) -> impl IntoResponse {
    match AllocationsService::list(state.store.as_ref(), query).await {
        Ok(allocations) => {
            let meta = ResponseMeta {
                reference_date: None,
                total_count: Some(allocations.len() as i64),
            };
            let response = ApiResponse::success_with_meta(allocations, "Allocations retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_allocation(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateAllocationRequest>,
) -> impl IntoResponse {
    match AllocationsService::create(state.store.as_ref(), &state.cache, payload).await {
        Ok(allocation) => {
            let response = ApiResponse::created(allocation, "Allocation created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_allocation(
    State(state): State<Arc<AppState>>,
    Path(allocation_id): Path<Uuid>,
    Json(payload): Json<UpdateAllocationRequest>,
) -> impl IntoResponse {
    match AllocationsService::update(state.store.as_ref(), &state.cache, allocation_id, payload).await {
        Ok(allocation) => {
            let response = ApiResponse::success(allocation, "Allocation updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_allocation(
    State(state): State<Arc<AppState>>,
    Path(allocation_id): Path<Uuid>,
) -> impl IntoResponse {
    match AllocationsService::delete(state.store.as_ref(), &state.cache, allocation_id).await {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Allocation deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn release_allocation(
    State(state): State<Arc<AppState>>,
    Path(allocation_id): Path<Uuid>,
    ctx: RequestContext,
    payload: Option<Json<ReleaseAllocationRequest>>,
) -> impl IntoResponse {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    match AllocationsService::release(state.store.as_ref(), &state.cache, &ctx, allocation_id, payload).await {
        Ok(transition) => {
            let response = ApiResponse::created(transition, "Employee released from project");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
