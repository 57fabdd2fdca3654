pub mod allocations;
pub mod certifications;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod projects;
pub mod transitions;

use crate::AppState;
use crate::db::models::api::ResponseMeta;
use crate::services::context::RequestContext;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

/// Meta block for responses whose data was derived as of the request date.
pub(crate) fn dated(ctx: &RequestContext, total_count: Option<i64>) -> ResponseMeta {
    ResponseMeta {
        reference_date: Some(ctx.reference_date),
        total_count,
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/employees", get(employees::get_employees))
        .route("/employees", post(employees::create_employee))
        .route("/employees/:employee_id", get(employees::get_employee))
        .route(
            "/employees/:employee_id/status",
            put(employees::update_employee_status),
        )
        .route(
            "/employees/:employee_id/history",
            get(employees::get_employee_history),
        )
        .route(
            "/employees/:employee_id/certifications",
            get(certifications::get_certifications),
        )
        .route(
            "/employees/:employee_id/certifications",
            post(certifications::create_certification),
        )
        .route(
            "/certifications/:certification_id",
            delete(certifications::delete_certification),
        )
        .route("/allocations", get(allocations::get_allocations))
        .route("/allocations", post(allocations::create_allocation))
        .route(
            "/allocations/:allocation_id",
            put(allocations::update_allocation),
        )
        .route(
            "/allocations/:allocation_id",
            delete(allocations::delete_allocation),
        )
        .route(
            "/allocations/:allocation_id/release",
            post(allocations::release_allocation),
        )
        .route("/projects", get(projects::get_projects))
        .route("/projects", post(projects::create_project))
        .route("/projects/:project_id", get(projects::get_project))
        .route("/projects/:project_id", put(projects::update_project))
        .route(
            "/projects/:project_id/transitions",
            get(projects::get_project_transitions),
        )
        .route("/transitions", post(transitions::create_transition))
        .route(
            "/transitions/:transition_id",
            delete(transitions::delete_transition),
        )
        .route(
            "/transitions/:transition_id/comments",
            get(transitions::get_comments),
        )
        .route(
            "/transitions/:transition_id/comments",
            post(transitions::create_comment),
        )
        .route("/dashboard/kpis", get(dashboard::get_kpis))
        .route("/dashboard/entities", get(dashboard::get_entity_rollups))
        .with_state(state)
}
