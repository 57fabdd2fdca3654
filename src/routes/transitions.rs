use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::transition::{CreateCommentRequest, CreateTransitionRequest};
use crate::services::TransitionsService;
use crate::services::context::RequestContext;

pub async fn create_transition(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTransitionRequest>,
) -> impl IntoResponse {
    match TransitionsService::create(state.store.as_ref(), &state.cache, payload).await {
        Ok(transition) => {
            let response = ApiResponse::created(transition, "Transition recorded successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_transition(
    State(state): State<Arc<AppState>>,
    Path(transition_id): Path<Uuid>,
) -> impl IntoResponse {
    match TransitionsService::delete(state.store.as_ref(), &state.cache, transition_id).await {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Transition deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_comments(
    State(state): State<Arc<AppState>>,
    Path(transition_id): Path<Uuid>,
) -> impl IntoResponse {
    match TransitionsService::list_comments(state.store.as_ref(), transition_id).await {
        Ok(comments) => {
            let response = ApiResponse::success(comments, "Comments retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(transition_id): Path<Uuid>,
    ctx: RequestContext,
    Json(payload): Json<CreateCommentRequest>,
) -> impl IntoResponse {
    match TransitionsService::add_comment(state.store.as_ref(), &state.cache, &ctx, transition_id, payload).await {
        Ok(comment) => {
            let response = ApiResponse::created(comment, "Comment created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
