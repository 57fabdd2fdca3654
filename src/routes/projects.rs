use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::project::{CreateProjectRequest, UpdateProjectRequest};
use crate::routes::dated;
use crate::services::ProjectsService;
use crate::services::context::RequestContext;
use crate::validation::ValidatedJson;

pub async fn get_projects(State(state): State<Arc<AppState>>, ctx: RequestContext) -> impl IntoResponse {
    match ProjectsService::list(state.store.as_ref(), &state.cache, &ctx).await {
        Ok(projects) => {
            let meta = dated(&ctx, Some(projects.len() as i64));
            let response = ApiResponse::success_with_meta(projects, "Projects retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    ctx: RequestContext,
) -> impl IntoResponse {
    match ProjectsService::get(state.store.as_ref(), &state.cache, &ctx, project_id).await {
        Ok(detail) => {
            let response = ApiResponse::success_with_meta(detail, "Project retrieved successfully", dated(&ctx, None));
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> impl IntoResponse {
    match ProjectsService::create(state.store.as_ref(), &state.cache, &ctx, payload).await {
        Ok(project) => {
            let response = ApiResponse::created(project, "Project created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    ctx: RequestContext,
    Json(payload): Json<UpdateProjectRequest>,
) -> impl IntoResponse {
    match ProjectsService::update(state.store.as_ref(), &state.cache, &ctx, project_id, payload).await {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_project_transitions(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    match ProjectsService::transitions(state.store.as_ref(), &state.cache, project_id).await {
        Ok(transitions) => {
            let response = ApiResponse::success(transitions, "Project transitions retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
