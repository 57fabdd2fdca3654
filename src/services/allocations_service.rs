use tracing::info;
use uuid::Uuid;

use crate::cache::{ProjectionCache, RecordKind, WriteScope};
use crate::db::models::api::error_codes;
use crate::db::models::{
    Allocation, AllocationQuery, AllocationWithProject, NewAllocation, NewProjectTransition,
    ProjectTransition,
    allocation::{CreateAllocationRequest, ReleaseAllocationRequest, UpdateAllocationRequest},
};
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::employees_service::EmployeesService;
use crate::services::projects_service::ProjectsService;
use crate::store::WorkforceStore;
use crate::utilization::{DateRange, Dated, TransitionDraft, finalize_transition};
use crate::validation::allocation::{
    validate_create_allocation, validate_release, validate_update_allocation,
};
use crate::validation::rules::limit_text;

pub struct AllocationsService;

impl AllocationsService {
    pub async fn list(
        store: &dyn WorkforceStore,
        query: AllocationQuery,
    ) -> AppResult<Vec<AllocationWithProject>> {
        store.list_allocations_with_projects(query).await
    }

    pub async fn create(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        req: CreateAllocationRequest,
    ) -> AppResult<Allocation> {
        validate_create_allocation(&req)?;
        EmployeesService::require_assignable(store, req.employee_id).await?;
        ProjectsService::require(store, req.project_id).await?;

        let range = DateRange::new(req.start_date, req.end_date);
        Self::ensure_no_overlap(store, req.employee_id, req.project_id, range, None).await?;

        let allocation = store
            .insert_allocation(NewAllocation {
                employee_id: req.employee_id,
                project_id: req.project_id,
                utilization_percent: req.utilization_percent,
                start_date: req.start_date,
                end_date: req.end_date,
                role: req.role,
            })
            .await?;

        Self::invalidate(cache, &allocation).await;
        info!(
            allocation_id = %allocation.id,
            employee_id = %allocation.employee_id,
            project_id = %allocation.project_id,
            percent = allocation.utilization_percent,
            "allocation created"
        );
        Ok(allocation)
    }

    pub async fn update(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        allocation_id: Uuid,
        req: UpdateAllocationRequest,
    ) -> AppResult<Allocation> {
        let existing = Self::require(store, allocation_id).await?;
        let changes = validate_update_allocation(&existing, req)?;
        if changes.is_empty() {
            return Ok(existing);
        }

        let range = DateRange::new(
            changes.start_date.unwrap_or(existing.start_date),
            changes.end_date.unwrap_or(existing.end_date),
        );
        Self::ensure_no_overlap(
            store,
            existing.employee_id,
            existing.project_id,
            range,
            Some(allocation_id),
        )
        .await?;

        let allocation = store.update_allocation(allocation_id, changes).await?;
        Self::invalidate(cache, &allocation).await;
        info!(allocation_id = %allocation_id, "allocation updated");
        Ok(allocation)
    }

    pub async fn delete(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        allocation_id: Uuid,
    ) -> AppResult<()> {
        let existing = Self::require(store, allocation_id).await?;
        store.delete_allocation(allocation_id).await?;
        Self::invalidate(cache, &existing).await;
        info!(allocation_id = %allocation_id, "allocation deleted");
        Ok(())
    }

    /// Takes the employee off the project: the allocation is removed and
    /// the tenure is recorded as a completed transition ending on the
    /// release date.
    pub async fn release(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
        allocation_id: Uuid,
        req: ReleaseAllocationRequest,
    ) -> AppResult<ProjectTransition> {
        let allocation = Self::require(store, allocation_id).await?;
        let end_date = req.end_date.unwrap_or(ctx.reference_date);
        validate_release(&allocation, end_date, ctx.reference_date)?;
        limit_text("Notes", req.notes.as_deref())?;

        let finalized = finalize_transition(TransitionDraft {
            start_date: Some(allocation.start_date),
            end_date: Some(end_date),
            duration_days: None,
        });
        let transition = store
            .release_allocation(
                allocation_id,
                NewProjectTransition {
                    employee_id: allocation.employee_id,
                    project_id: allocation.project_id,
                    start_date: finalized.start_date,
                    end_date: finalized.end_date,
                    duration_days: finalized.duration_days,
                    status: finalized.status,
                    notes: req.notes,
                },
            )
            .await?;

        let scope = WriteScope::employee_on_project(allocation.employee_id, allocation.project_id);
        cache.invalidate(RecordKind::Allocation, scope).await;
        cache.invalidate(RecordKind::ProjectTransition, scope).await;
        info!(
            allocation_id = %allocation_id,
            transition_id = %transition.id,
            duration_days = ?transition.duration_days,
            "allocation released"
        );
        Ok(transition)
    }

    pub async fn require(store: &dyn WorkforceStore, allocation_id: Uuid) -> AppResult<Allocation> {
        store
            .find_allocation(allocation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Allocation"))
    }

    /// An employee holds at most one allocation per project on any day.
    async fn ensure_no_overlap(
        store: &dyn WorkforceStore,
        employee_id: Uuid,
        project_id: Uuid,
        range: DateRange,
        ignore: Option<Uuid>,
    ) -> AppResult<()> {
        let existing = store
            .list_allocations(AllocationQuery {
                employee_id: Some(employee_id),
                project_id: Some(project_id),
                ..Default::default()
            })
            .await?;
        let clash = existing
            .iter()
            .filter(|a| Some(a.id) != ignore)
            .any(|a| a.date_range().overlaps(&range));
        if clash {
            return Err(AppError::conflict(
                "Employee already has an allocation on this project for an overlapping period",
                "start_date",
                error_codes::ALLOCATION_OVERLAPS_PROJECT,
            ));
        }
        Ok(())
    }

    async fn invalidate(cache: &ProjectionCache, allocation: &Allocation) {
        cache
            .invalidate(
                RecordKind::Allocation,
                WriteScope::employee_on_project(allocation.employee_id, allocation.project_id),
            )
            .await;
    }
}
