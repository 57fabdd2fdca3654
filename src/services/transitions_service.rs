use futures::future::try_join_all;
use tracing::info;
use uuid::Uuid;

use crate::cache::{ProjectionCache, RecordKind, WriteScope};
use crate::db::models::{
    NewProjectTransition, NewTransitionComment, ProjectTransition, TransitionComment,
    TransitionWithComments,
    transition::{CreateCommentRequest, CreateTransitionRequest},
};
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::employees_service::EmployeesService;
use crate::services::projects_service::ProjectsService;
use crate::store::WorkforceStore;
use crate::utilization::{TransitionDraft, finalize_transition};
use crate::validation::comment::validate_comment_body;
use crate::validation::transition::validate_create_transition;

pub struct TransitionsService;

impl TransitionsService {
    /// Records a finished tenure. The duration is recomputed from the dates
    /// whenever both are present and the status is always `completed`.
    pub async fn create(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        req: CreateTransitionRequest,
    ) -> AppResult<ProjectTransition> {
        validate_create_transition(&req)?;
        EmployeesService::require(store, req.employee_id).await?;
        ProjectsService::require(store, req.project_id).await?;

        let finalized = finalize_transition(TransitionDraft {
            start_date: req.start_date,
            end_date: req.end_date,
            duration_days: req.duration_days,
        });
        let transition = store
            .insert_transition(NewProjectTransition {
                employee_id: req.employee_id,
                project_id: req.project_id,
                start_date: finalized.start_date,
                end_date: finalized.end_date,
                duration_days: finalized.duration_days,
                status: finalized.status,
                notes: req.notes,
            })
            .await?;

        cache
            .invalidate(RecordKind::ProjectTransition, Self::scope(&transition))
            .await;
        info!(transition_id = %transition.id, duration_days = ?transition.duration_days, "transition recorded");
        Ok(transition)
    }

    pub async fn delete(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        transition_id: Uuid,
    ) -> AppResult<()> {
        let transition = Self::require(store, transition_id).await?;
        store.delete_transition(transition_id).await?;
        cache
            .invalidate(RecordKind::ProjectTransition, Self::scope(&transition))
            .await;
        info!(transition_id = %transition_id, "transition deleted");
        Ok(())
    }

    pub async fn list_comments(
        store: &dyn WorkforceStore,
        transition_id: Uuid,
    ) -> AppResult<Vec<TransitionComment>> {
        Self::require(store, transition_id).await?;
        store.list_comments(transition_id).await
    }

    pub async fn add_comment(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
        transition_id: Uuid,
        req: CreateCommentRequest,
    ) -> AppResult<TransitionComment> {
        validate_comment_body(&req.body)?;
        let transition = Self::require(store, transition_id).await?;

        let comment = store
            .insert_comment(NewTransitionComment {
                transition_id,
                author_id: ctx.actor_id,
                body: req.body,
            })
            .await?;
        cache
            .invalidate(RecordKind::TransitionComment, Self::scope(&transition))
            .await;
        info!(transition_id = %transition_id, comment_id = %comment.id, "transition comment added");
        Ok(comment)
    }

    /// Attaches each transition's comment thread, preserving input order.
    pub async fn with_comments(
        store: &dyn WorkforceStore,
        transitions: Vec<ProjectTransition>,
    ) -> AppResult<Vec<TransitionWithComments>> {
        try_join_all(transitions.into_iter().map(|transition| async move {
            let comments = store.list_comments(transition.id).await?;
            Ok::<_, AppError>(TransitionWithComments {
                transition,
                comments,
            })
        }))
        .await
    }

    pub async fn require(store: &dyn WorkforceStore, transition_id: Uuid) -> AppResult<ProjectTransition> {
        store
            .find_transition(transition_id)
            .await?
            .ok_or_else(|| AppError::not_found("Transition"))
    }

    fn scope(transition: &ProjectTransition) -> WriteScope {
        WriteScope::employee_on_project(transition.employee_id, transition.project_id)
    }
}
