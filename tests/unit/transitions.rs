use super::{Harness, ctx, d};
use uuid::Uuid;
use workforce_backend::cache::CacheKey;
use workforce_backend::db::enums::{Entity, ProjectStatus};
use workforce_backend::db::models::transition::{CreateCommentRequest, CreateTransitionRequest};
use workforce_backend::error::AppError;
use workforce_backend::services::context::RequestContext;
use workforce_backend::services::{EmployeesService, ProjectsService, TransitionsService};

#[tokio::test]
async fn duration_comes_from_dates_when_both_are_known() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Consulting, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Completed, None).await;

    let dated = TransitionsService::create(
        &h.store,
        &h.cache,
        CreateTransitionRequest {
            employee_id: alice.id,
            project_id: atlas.id,
            start_date: Some(d(2024, 1, 1)),
            end_date: Some(d(2024, 1, 11)),
            duration_days: Some(99),
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(dated.duration_days, Some(10));

    let open = TransitionsService::create(
        &h.store,
        &h.cache,
        CreateTransitionRequest {
            employee_id: alice.id,
            project_id: atlas.id,
            start_date: Some(d(2024, 2, 1)),
            end_date: None,
            duration_days: Some(14),
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(open.duration_days, Some(14));

    let history = ProjectsService::transitions(&h.store, &h.cache, atlas.id).await.unwrap();
    let ids: Vec<Uuid> = history.iter().map(|t| t.transition.id).collect();
    assert_eq!(ids, vec![open.id, dated.id]);
}

#[tokio::test]
async fn transition_for_unknown_employee_is_not_found() {
    let h = Harness::new();
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let err = TransitionsService::create(
        &h.store,
        &h.cache,
        CreateTransitionRequest {
            employee_id: Uuid::new_v4(),
            project_id: atlas.id,
            start_date: None,
            end_date: None,
            duration_days: None,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn comments_thread_onto_history_and_refresh_it() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Consulting, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Completed, None).await;
    let transition = TransitionsService::create(
        &h.store,
        &h.cache,
        CreateTransitionRequest {
            employee_id: alice.id,
            project_id: atlas.id,
            start_date: Some(d(2024, 1, 1)),
            end_date: Some(d(2024, 3, 1)),
            duration_days: None,
            notes: Some("Handover complete".to_string()),
        },
    )
    .await
    .unwrap();

    EmployeesService::history(&h.store, &h.cache, alice.id).await.unwrap();
    assert!(h.cache.contains(&CacheKey::employee_history(alice.id)).await);

    let author = Uuid::new_v4();
    let reviewer = RequestContext::new(author, d(2024, 3, 2));
    let blank = TransitionsService::add_comment(
        &h.store,
        &h.cache,
        &reviewer,
        transition.id,
        CreateCommentRequest { body: "  ".to_string() },
    )
    .await
    .unwrap_err();
    assert!(matches!(blank, AppError::Validation { .. }));
    assert!(h.cache.contains(&CacheKey::employee_history(alice.id)).await);

    let comment = TransitionsService::add_comment(
        &h.store,
        &h.cache,
        &reviewer,
        transition.id,
        CreateCommentRequest {
            body: "Client asked for Alice again".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(comment.author_id, author);
    assert!(!h.cache.contains(&CacheKey::employee_history(alice.id)).await);

    let history = EmployeesService::history(&h.store, &h.cache, alice.id).await.unwrap();
    assert_eq!(history[0].comments.len(), 1);
    assert_eq!(history[0].comments[0].body, "Client asked for Alice again");
}

#[tokio::test]
async fn deleting_a_transition_removes_its_comments() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Consulting, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Completed, None).await;
    let transition = TransitionsService::create(
        &h.store,
        &h.cache,
        CreateTransitionRequest {
            employee_id: alice.id,
            project_id: atlas.id,
            start_date: Some(d(2024, 1, 1)),
            end_date: Some(d(2024, 2, 1)),
            duration_days: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    TransitionsService::add_comment(
        &h.store,
        &h.cache,
        &ctx(d(2024, 2, 2)),
        transition.id,
        CreateCommentRequest {
            body: "Noted".to_string(),
        },
    )
    .await
    .unwrap();

    TransitionsService::delete(&h.store, &h.cache, transition.id).await.unwrap();

    let err = TransitionsService::list_comments(&h.store, transition.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    assert!(EmployeesService::history(&h.store, &h.cache, alice.id)
        .await
        .unwrap()
        .is_empty());
}
