use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::certification::CreateCertificationRequest;
use crate::services::CertificationsService;
use crate::validation::ValidatedJson;

pub async fn get_certifications(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<Uuid>,
) -> impl IntoResponse {
    match CertificationsService::list(state.store.as_ref(), &state.cache, employee_id).await {
        Ok(certifications) => {
            let response = ApiResponse::success(certifications, "Certifications retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_certification(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateCertificationRequest>,
) -> impl IntoResponse {
    match CertificationsService::create(state.store.as_ref(), &state.cache, employee_id, payload).await {
        Ok(certification) => {
            let response = ApiResponse::created(certification, "Certification added successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_certification(
    State(state): State<Arc<AppState>>,
    Path(certification_id): Path<Uuid>,
) -> impl IntoResponse {
    match CertificationsService::delete(state.store.as_ref(), &state.cache, certification_id).await {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Certification removed successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
