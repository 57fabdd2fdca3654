use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::{CacheKey, ProjectionCache, RecordKind, WriteScope};
use crate::db::enums::ProjectStatus;
use crate::db::models::api::error_codes;
use crate::db::models::{
    Allocation, AllocationQuery, NewProject, Project, ProjectChanges, TransitionQuery,
    TransitionWithComments,
    project::{CreateProjectRequest, UpdateProjectRequest},
};
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::transitions_service::TransitionsService;
use crate::store::WorkforceStore;
use crate::utilization::{
    current_utilization, effective_status, is_active, normalize_proposal_start, should_activate,
};
use crate::validation::project::{validate_create_project, validate_update_project};

/// Project as seen on the reference date, with the allocations staffing it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub active_allocations: Vec<Allocation>,
    /// Sum of the active allocation percentages across all staff.
    pub staffed_percent: i32,
}

pub struct ProjectsService;

impl ProjectsService {
    /// Lists projects, first activating every proposal whose start date has
    /// arrived. The activation is persisted before the list is returned.
    pub async fn list(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
    ) -> AppResult<Vec<Project>> {
        let today = ctx.reference_date;
        cache
            .get_or_load(CacheKey::project_list(today), || async move {
                let mut projects = store.list_projects().await?;
                for project in projects.iter_mut().filter(|p| should_activate(p, today)) {
                    *project = Self::activate(store, cache, project.id).await?;
                }
                Ok(projects)
            })
            .await
    }

    /// Single-project view. A due proposal is shown as active but not
    /// persisted; only the list read writes the correction back.
    pub async fn get(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> AppResult<ProjectDetail> {
        let reference_date = ctx.reference_date;
        cache
            .get_or_load(CacheKey::project(project_id, reference_date), || async move {
                let mut project = Self::require(store, project_id).await?;
                project.status = effective_status(&project, reference_date);
                let active_allocations: Vec<Allocation> = store
                    .list_allocations(AllocationQuery::for_project(project_id))
                    .await?
                    .into_iter()
                    .filter(|a| is_active(a, reference_date))
                    .collect();
                Ok(ProjectDetail {
                    staffed_percent: current_utilization(&active_allocations, reference_date),
                    project,
                    active_allocations,
                })
            })
            .await
    }

    async fn activate(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        project_id: Uuid,
    ) -> AppResult<Project> {
        let changes = ProjectChanges {
            status: Some(ProjectStatus::Active),
            ..Default::default()
        };
        let project = store.update_project(project_id, changes).await.inspect_err(|e| {
            warn!(project_id = %project_id, error = %e, "failed to activate due proposal");
        })?;
        cache
            .invalidate(RecordKind::Project, WriteScope::project(project_id))
            .await;
        info!(project_id = %project_id, "proposal activated on start date");
        Ok(project)
    }

    pub async fn create(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
        req: CreateProjectRequest,
    ) -> AppResult<Project> {
        validate_create_project(&req)?;
        let name = req.name.trim().to_string();
        Self::ensure_name_available(store, &name).await?;

        let start_date = normalize_proposal_start(req.start_date, req.status, ctx.reference_date);
        let project = store
            .insert_project(NewProject {
                name,
                entity: req.entity,
                status: req.status,
                start_date,
                end_date: req.end_date,
            })
            .await?;

        cache
            .invalidate(RecordKind::Project, WriteScope::project(project.id))
            .await;
        info!(project_id = %project.id, status = %project.status, "project created");
        Ok(project)
    }

    pub async fn update(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
        project_id: Uuid,
        req: UpdateProjectRequest,
    ) -> AppResult<Project> {
        let existing = Self::require(store, project_id).await?;
        validate_update_project(&existing, &req)?;

        let name = req.name.as_deref().map(str::trim).map(str::to_string);
        if let Some(name) = name.as_deref().filter(|n| *n != existing.name) {
            Self::ensure_name_available(store, name).await?;
        }

        let mut changes = ProjectChanges {
            name: name.filter(|n| *n != existing.name),
            entity: req.entity.filter(|e| *e != existing.entity),
            status: req.status.filter(|s| *s != existing.status),
            start_date: req.start_date.filter(|d| *d != existing.start_date),
            end_date: req.end_date.filter(|d| *d != existing.end_date),
        };

        // A proposal touched by this update must still start in the future.
        let status = changes.status.unwrap_or(existing.status);
        if status == ProjectStatus::Proposal
            && (changes.status.is_some() || changes.start_date.is_some())
        {
            let start = changes.start_date.unwrap_or(existing.start_date);
            let normalized = normalize_proposal_start(start, status, ctx.reference_date);
            changes.start_date = (normalized != existing.start_date).then_some(normalized);
        }

        if changes.is_empty() {
            return Ok(existing);
        }

        let project = store.update_project(project_id, changes).await?;
        cache
            .invalidate(RecordKind::Project, WriteScope::project(project_id))
            .await;
        info!(project_id = %project_id, "project updated");
        Ok(project)
    }

    pub async fn transitions(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        project_id: Uuid,
    ) -> AppResult<Vec<TransitionWithComments>> {
        cache
            .get_or_load(CacheKey::transition_history(project_id), || async move {
                Self::require(store, project_id).await?;
                let transitions = store
                    .list_transitions(TransitionQuery {
                        project_id: Some(project_id),
                        ..Default::default()
                    })
                    .await?;
                TransitionsService::with_comments(store, transitions).await
            })
            .await
    }

    pub async fn require(store: &dyn WorkforceStore, project_id: Uuid) -> AppResult<Project> {
        store
            .find_project(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project"))
    }

    async fn ensure_name_available(store: &dyn WorkforceStore, name: &str) -> AppResult<()> {
        if store.project_name_exists(name).await? {
            return Err(AppError::conflict(
                "A project with this name already exists",
                "name",
                error_codes::PROJECT_NAME_EXISTS,
            ));
        }
        Ok(())
    }
}
