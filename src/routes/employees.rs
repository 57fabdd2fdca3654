use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::employee::{CreateEmployeeRequest, UpdateEmployeeStatusRequest};
use crate::routes::dated;
use crate::services::EmployeesService;
use crate::services::context::RequestContext;
use crate::validation::ValidatedJson;

pub async fn get_employees(State(state): State<Arc<AppState>>, ctx: RequestContext) -> impl IntoResponse {
    match EmployeesService::list(state.store.as_ref(), &state.cache, &ctx).await {
        Ok(employees) => {
            let meta = dated(&ctx, Some(employees.len() as i64));
            let response = ApiResponse::success_with_meta(employees, "Employees retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<Uuid>,
    ctx: RequestContext,
) -> impl IntoResponse {
    match EmployeesService::get(state.store.as_ref(), &state.cache, &ctx, employee_id).await {
        Ok(detail) => {
            let response = ApiResponse::success_with_meta(detail, "Employee retrieved successfully", dated(&ctx, None));
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> impl IntoResponse {
    match EmployeesService::create(state.store.as_ref(), &state.cache, payload).await {
        Ok(employee) => {
            let response = ApiResponse::created(employee, "Employee created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_employee_status(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeStatusRequest>,
) -> impl IntoResponse {
    match EmployeesService::update_status(state.store.as_ref(), &state.cache, employee_id, payload).await {
        Ok(employee) => {
            let response = ApiResponse::success(employee, "Employee status updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_employee_history(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<Uuid>,
) -> impl IntoResponse {
    match EmployeesService::history(state.store.as_ref(), &state.cache, employee_id).await {
        Ok(history) => {
            let response = ApiResponse::success(history, "Employee history retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
