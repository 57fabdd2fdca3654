use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::cache::{CacheKey, ProjectionCache, RecordKind, WriteScope};
use crate::db::enums::EmployeeStatus;
use crate::db::models::api::error_codes;
use crate::db::models::{
    AllocationQuery, AllocationWithProject, Employee, NewEmployee, TransitionQuery,
    TransitionWithComments,
    employee::{CreateEmployeeRequest, UpdateEmployeeStatusRequest},
};
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::transitions_service::TransitionsService;
use crate::services::workforce::WorkforceRecords;
use crate::store::WorkforceStore;
use crate::utilization::{OptimizationEmployee, project_employee};
use crate::validation::employee::{normalize_skills, validate_create_employee};

/// Employee projection together with the allocations behind it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EmployeeDetail {
    #[serde(flatten)]
    pub employee: OptimizationEmployee,
    pub allocations: Vec<AllocationWithProject>,
}

pub struct EmployeesService;

impl EmployeesService {
    pub async fn list(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
    ) -> AppResult<Vec<OptimizationEmployee>> {
        let reference_date = ctx.reference_date;
        cache
            .get_or_load(CacheKey::employee_list(reference_date), || async move {
                let records = WorkforceRecords::load(store).await?;
                Ok(records.project(reference_date))
            })
            .await
    }

    pub async fn get(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
        employee_id: Uuid,
    ) -> AppResult<EmployeeDetail> {
        let reference_date = ctx.reference_date;
        cache
            .get_or_load(CacheKey::employee(employee_id, reference_date), || async move {
                let employee = Self::require(store, employee_id).await?;
                let query = AllocationQuery::for_employee(employee_id);
                let (allocations, joined, transitions, projects) = futures::try_join!(
                    store.list_allocations(query),
                    store.list_allocations_with_projects(query),
                    store.list_transitions(TransitionQuery {
                        employee_id: Some(employee_id),
                        ..Default::default()
                    }),
                    store.list_projects(),
                )?;
                Ok(EmployeeDetail {
                    employee: project_employee(
                        &employee,
                        &allocations,
                        &transitions,
                        &projects,
                        reference_date,
                    ),
                    allocations: joined,
                })
            })
            .await
    }

    pub async fn create(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        req: CreateEmployeeRequest,
    ) -> AppResult<Employee> {
        validate_create_employee(&req)?;
        let email = req.email.trim().to_lowercase();
        if store.employee_email_exists(&email).await? {
            return Err(AppError::conflict(
                "An employee with this email already exists",
                "email",
                error_codes::EMPLOYEE_EMAIL_EXISTS,
            ));
        }

        let employee = store
            .insert_employee(NewEmployee {
                full_name: req.full_name.trim().to_string(),
                email,
                entity: req.entity,
                employment_type: req.employment_type,
                status: EmployeeStatus::Active,
                skills: normalize_skills(&req.skills),
                hire_date: req.hire_date,
            })
            .await?;

        cache
            .invalidate(RecordKind::Employee, WriteScope::employee(employee.id))
            .await;
        info!(employee_id = %employee.id, "employee created");
        Ok(employee)
    }

    pub async fn update_status(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        employee_id: Uuid,
        req: UpdateEmployeeStatusRequest,
    ) -> AppResult<Employee> {
        let current = Self::require(store, employee_id).await?;
        if current.status == req.status {
            return Ok(current);
        }

        let employee = store.update_employee_status(employee_id, req.status).await?;
        cache
            .invalidate(RecordKind::Employee, WriteScope::employee(employee_id))
            .await;
        info!(employee_id = %employee_id, from = %current.status, to = %employee.status, "employee status changed");
        Ok(employee)
    }

    /// Completed tenures of the employee, open ones first, then by most
    /// recent end date.
    pub async fn history(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        employee_id: Uuid,
    ) -> AppResult<Vec<TransitionWithComments>> {
        cache
            .get_or_load(CacheKey::employee_history(employee_id), || async move {
                Self::require(store, employee_id).await?;
                let transitions = store
                    .list_transitions(TransitionQuery {
                        employee_id: Some(employee_id),
                        ..Default::default()
                    })
                    .await?;
                TransitionsService::with_comments(store, transitions).await
            })
            .await
    }

    pub async fn require(store: &dyn WorkforceStore, employee_id: Uuid) -> AppResult<Employee> {
        store
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee"))
    }

    /// Like [`Self::require`], but archived employees cannot take new work.
    pub async fn require_assignable(store: &dyn WorkforceStore, employee_id: Uuid) -> AppResult<Employee> {
        let employee = Self::require(store, employee_id).await?;
        if employee.status == EmployeeStatus::Archived {
            return Err(AppError::conflict(
                "Archived employees cannot be assigned",
                "employee_id",
                error_codes::EMPLOYEE_ARCHIVED,
            ));
        }
        Ok(employee)
    }
}
