use super::{Harness, ctx, d};
use workforce_backend::cache::CacheKey;
use workforce_backend::db::enums::{Entity, ProjectStatus};
use workforce_backend::db::models::allocation::CreateAllocationRequest;
use workforce_backend::db::models::api::error_codes;
use workforce_backend::db::models::project::{CreateProjectRequest, UpdateProjectRequest};
use workforce_backend::error::AppError;
use workforce_backend::services::{AllocationsService, ProjectsService};
use workforce_backend::store::WorkforceStore;

fn proposal(name: &str, start: Option<chrono::NaiveDate>) -> CreateProjectRequest {
    CreateProjectRequest {
        name: name.to_string(),
        entity: Entity::Consulting,
        status: ProjectStatus::Proposal,
        start_date: start,
        end_date: None,
    }
}

#[tokio::test]
async fn proposals_are_created_in_the_future() {
    let h = Harness::new();
    let today = ctx(d(2024, 6, 1));

    let undated = ProjectsService::create(&h.store, &h.cache, &today, proposal("Undated", None))
        .await
        .unwrap();
    assert_eq!(undated.start_date, Some(d(2024, 6, 2)));

    let backdated = ProjectsService::create(
        &h.store,
        &h.cache,
        &today,
        proposal("Backdated", Some(d(2024, 1, 1))),
    )
    .await
    .unwrap();
    assert_eq!(backdated.start_date, Some(d(2024, 6, 2)));

    let future = ProjectsService::create(
        &h.store,
        &h.cache,
        &today,
        proposal("Future", Some(d(2024, 9, 1))),
    )
    .await
    .unwrap();
    assert_eq!(future.start_date, Some(d(2024, 9, 1)));
    assert_eq!(future.status, ProjectStatus::Proposal);
}

#[tokio::test]
async fn listing_activates_due_proposals_and_persists_it() {
    let h = Harness::new();
    let due = h.project("Due", ProjectStatus::Proposal, Some(d(2024, 1, 1))).await;
    let pending = h.project("Pending", ProjectStatus::Proposal, Some(d(2099, 1, 1))).await;

    let projects = ProjectsService::list(&h.store, &h.cache, &ctx(d(2024, 6, 1)))
        .await
        .unwrap();
    let status_of = |id| projects.iter().find(|p| p.id == id).map(|p| p.status);
    assert_eq!(status_of(due.id), Some(ProjectStatus::Active));
    assert_eq!(status_of(pending.id), Some(ProjectStatus::Proposal));

    let stored = h.store.find_project(due.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ProjectStatus::Active);
}

#[tokio::test]
async fn plain_listing_is_cached() {
    let h = Harness::new();
    h.project("Steady", ProjectStatus::Active, None).await;
    let day = d(2024, 6, 1);
    ProjectsService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();
    assert!(h.cache.contains(&CacheKey::project_list(day)).await);
}

#[tokio::test]
async fn duplicate_names_conflict() {
    let h = Harness::new();
    let today = ctx(d(2024, 6, 1));
    let active = CreateProjectRequest {
        status: ProjectStatus::Active,
        ..proposal("Atlas", None)
    };
    ProjectsService::create(&h.store, &h.cache, &today, active).await.unwrap();

    let err = ProjectsService::create(&h.store, &h.cache, &today, proposal(" Atlas ", None))
        .await
        .unwrap_err();
    match err {
        AppError::Conflict { code, .. } => {
            assert_eq!(code.as_deref(), Some(error_codes::PROJECT_NAME_EXISTS))
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn moving_back_to_proposal_pushes_start_forward() {
    let h = Harness::new();
    let project = h.project("Atlas", ProjectStatus::Active, Some(d(2024, 1, 1))).await;

    let updated = ProjectsService::update(
        &h.store,
        &h.cache,
        &ctx(d(2024, 6, 1)),
        project.id,
        UpdateProjectRequest {
            status: Some(ProjectStatus::Proposal),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, ProjectStatus::Proposal);
    assert_eq!(updated.start_date, Some(d(2024, 6, 2)));
}

#[tokio::test]
async fn update_rejects_inverted_dates_and_ignores_no_ops() {
    let h = Harness::new();
    let project = h.project("Atlas", ProjectStatus::Active, Some(d(2024, 3, 1))).await;
    let today = ctx(d(2024, 6, 1));

    let err = ProjectsService::update(
        &h.store,
        &h.cache,
        &today,
        project.id,
        UpdateProjectRequest {
            end_date: Some(Some(d(2024, 2, 1))),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let unchanged = ProjectsService::update(
        &h.store,
        &h.cache,
        &today,
        project.id,
        UpdateProjectRequest {
            name: Some("Atlas".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(unchanged.name, "Atlas");
}

#[tokio::test]
async fn detail_reports_staffing_on_the_reference_date() {
    let h = Harness::new();
    let today = ctx(d(2024, 6, 1));
    let project = h.project("Orbit", ProjectStatus::Proposal, Some(d(2024, 5, 1))).await;
    let ann = h.employee("Ann Lee", Entity::Technology, d(2022, 1, 1)).await;
    let raj = h.employee("Raj Rao", Entity::Technology, d(2022, 1, 1)).await;
    h.allocate(ann.id, project.id, 60, d(2024, 5, 1), None).await;
    h.allocate(raj.id, project.id, 50, d(2024, 1, 1), Some(d(2024, 3, 31))).await;

    let detail = ProjectsService::get(&h.store, &h.cache, &today, project.id)
        .await
        .unwrap();
    assert_eq!(detail.project.status, ProjectStatus::Active);
    assert_eq!(detail.active_allocations.len(), 1);
    assert_eq!(detail.staffed_percent, 60);
    assert!(h.cache.contains(&CacheKey::project(project.id, d(2024, 6, 1))).await);

    // The detail view does not persist activation.
    let stored = h.store.find_project(project.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ProjectStatus::Proposal);

    AllocationsService::create(
        &h.store,
        &h.cache,
        CreateAllocationRequest {
            employee_id: raj.id,
            project_id: project.id,
            utilization_percent: 40,
            start_date: d(2024, 6, 1),
            end_date: None,
            role: None,
        },
    )
    .await
    .unwrap();
    assert!(!h.cache.contains(&CacheKey::project(project.id, d(2024, 6, 1))).await);

    let detail = ProjectsService::get(&h.store, &h.cache, &today, project.id)
        .await
        .unwrap();
    assert_eq!(detail.staffed_percent, 100);
}
