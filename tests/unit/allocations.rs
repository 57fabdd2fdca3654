use super::{Harness, ctx, d};
use workforce_backend::cache::CacheKey;
use workforce_backend::db::enums::{EmployeeStatus, Entity, ProjectStatus, TransitionStatus};
use workforce_backend::db::models::allocation::{
    AllocationQuery, CreateAllocationRequest, ReleaseAllocationRequest, UpdateAllocationRequest,
};
use workforce_backend::db::models::api::error_codes;
use workforce_backend::db::models::employee::UpdateEmployeeStatusRequest;
use workforce_backend::error::AppError;
use workforce_backend::services::{AllocationsService, EmployeesService};
use workforce_backend::store::WorkforceStore;
use workforce_backend::utilization::RiskTier;

fn conflict_code(err: AppError) -> Option<String> {
    match err {
        AppError::Conflict { code, .. } => code,
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn allocation_write_invalidates_dependent_projections() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let day = d(2024, 6, 1);

    let before = EmployeesService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();
    assert_eq!(before[0].utilization, 0);
    h.cache
        .get_or_load(CacheKey::certifications(alice.id), || async { Ok(Vec::<String>::new()) })
        .await
        .unwrap();

    AllocationsService::create(
        &h.store,
        &h.cache,
        CreateAllocationRequest {
            employee_id: alice.id,
            project_id: atlas.id,
            utilization_percent: 40,
            start_date: d(2024, 5, 1),
            end_date: None,
            role: Some("Engineer".to_string()),
        },
    )
    .await
    .unwrap();

    assert!(!h.cache.contains(&CacheKey::employee_list(day)).await);
    assert!(h.cache.contains(&CacheKey::certifications(alice.id)).await);

    let after = EmployeesService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();
    assert_eq!(after[0].utilization, 40);
    assert_eq!(after[0].risk_tag, RiskTier::ReviewRequired);
}

#[tokio::test]
async fn failed_write_leaves_cached_projections_untouched() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let day = d(2024, 6, 1);
    EmployeesService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();

    h.store.set_fail_writes(true);
    let result = AllocationsService::create(
        &h.store,
        &h.cache,
        CreateAllocationRequest {
            employee_id: alice.id,
            project_id: atlas.id,
            utilization_percent: 100,
            start_date: d(2024, 1, 1),
            end_date: None,
            role: None,
        },
    )
    .await;
    h.store.set_fail_writes(false);

    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    assert!(h.cache.contains(&CacheKey::employee_list(day)).await);
    let list = EmployeesService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();
    assert_eq!(list[0].utilization, 0);
    assert!(h
        .store
        .list_allocations(AllocationQuery::for_employee(alice.id))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn overlapping_allocation_on_same_project_is_rejected() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    h.allocate(alice.id, atlas.id, 50, d(2024, 1, 1), Some(d(2024, 3, 31))).await;

    let request = |start| CreateAllocationRequest {
        employee_id: alice.id,
        project_id: atlas.id,
        utilization_percent: 20,
        start_date: start,
        end_date: None,
        role: None,
    };

    let err = AllocationsService::create(&h.store, &h.cache, request(d(2024, 3, 31)))
        .await
        .unwrap_err();
    assert_eq!(
        conflict_code(err).as_deref(),
        Some(error_codes::ALLOCATION_OVERLAPS_PROJECT)
    );

    AllocationsService::create(&h.store, &h.cache, request(d(2024, 4, 1)))
        .await
        .unwrap();
}

#[tokio::test]
async fn archived_employee_cannot_be_allocated() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    EmployeesService::update_status(
        &h.store,
        &h.cache,
        alice.id,
        UpdateEmployeeStatusRequest {
            status: EmployeeStatus::Archived,
        },
    )
    .await
    .unwrap();

    let err = AllocationsService::create(
        &h.store,
        &h.cache,
        CreateAllocationRequest {
            employee_id: alice.id,
            project_id: atlas.id,
            utilization_percent: 50,
            start_date: d(2024, 1, 1),
            end_date: None,
            role: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(conflict_code(err).as_deref(), Some(error_codes::EMPLOYEE_ARCHIVED));
}

#[tokio::test]
async fn update_validates_against_stored_allocation() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let allocation = h.allocate(alice.id, atlas.id, 50, d(2024, 1, 1), Some(d(2024, 6, 30))).await;

    let err = AllocationsService::update(
        &h.store,
        &h.cache,
        allocation.id,
        UpdateAllocationRequest {
            start_date: Some(d(2024, 7, 1)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let updated = AllocationsService::update(
        &h.store,
        &h.cache,
        allocation.id,
        UpdateAllocationRequest {
            utilization_percent: Some(75),
            end_date: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.utilization_percent, 75);
    assert_eq!(updated.end_date, None);
    assert_eq!(updated.start_date, d(2024, 1, 1));
}

#[tokio::test]
async fn release_records_completed_tenure_and_starts_bench() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let allocation = h.allocate(alice.id, atlas.id, 100, d(2024, 1, 1), None).await;

    let history = EmployeesService::history(&h.store, &h.cache, alice.id).await.unwrap();
    assert!(history.is_empty());
    assert!(h.cache.contains(&CacheKey::employee_history(alice.id)).await);

    let transition = AllocationsService::release(
        &h.store,
        &h.cache,
        &ctx(d(2024, 6, 1)),
        allocation.id,
        ReleaseAllocationRequest {
            end_date: Some(d(2024, 1, 11)),
            notes: Some("Project wound down".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(transition.duration_days, Some(10));
    assert_eq!(transition.status, TransitionStatus::Completed);
    assert_eq!(transition.start_date, Some(d(2024, 1, 1)));

    assert!(h.store.find_allocation(allocation.id).await.unwrap().is_none());
    assert!(!h.cache.contains(&CacheKey::employee_history(alice.id)).await);

    let history = EmployeesService::history(&h.store, &h.cache, alice.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].transition.id, transition.id);

    let later = EmployeesService::get(&h.store, &h.cache, &ctx(d(2024, 1, 21)), alice.id)
        .await
        .unwrap();
    assert_eq!(later.employee.utilization, 0);
    assert_eq!(later.employee.bench_days, 10);
    assert_eq!(later.employee.risk_tag, RiskTier::AtRisk);
}

#[tokio::test]
async fn release_defaults_to_reference_date_and_rejects_early_end() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let allocation = h.allocate(alice.id, atlas.id, 100, d(2024, 3, 1), None).await;

    let err = AllocationsService::release(
        &h.store,
        &h.cache,
        &ctx(d(2024, 2, 1)),
        allocation.id,
        ReleaseAllocationRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(h.store.find_allocation(allocation.id).await.unwrap().is_some());

    let transition = AllocationsService::release(
        &h.store,
        &h.cache,
        &ctx(d(2024, 3, 31)),
        allocation.id,
        ReleaseAllocationRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(transition.end_date, Some(d(2024, 3, 31)));
    assert_eq!(transition.duration_days, Some(30));
}

#[tokio::test]
async fn same_day_release_keeps_last_day_off_the_bench() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2020, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let allocation = h.allocate(alice.id, atlas.id, 100, d(2024, 1, 1), None).await;
    let last_day = d(2024, 6, 1);

    let transition = AllocationsService::release(
        &h.store,
        &h.cache,
        &ctx(last_day),
        allocation.id,
        ReleaseAllocationRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(transition.end_date, Some(last_day));

    let on_release = EmployeesService::get(&h.store, &h.cache, &ctx(last_day), alice.id)
        .await
        .unwrap();
    assert_eq!(on_release.employee.utilization, 0);
    assert_eq!(on_release.employee.bench_days, 0);
    assert_ne!(on_release.employee.risk_tag, RiskTier::LayoffConsideration);

    let next_day = EmployeesService::get(&h.store, &h.cache, &ctx(d(2024, 6, 2)), alice.id)
        .await
        .unwrap();
    assert_eq!(next_day.employee.bench_days, 1);
    assert_eq!(next_day.employee.risk_tag, RiskTier::AtRisk);
}

#[tokio::test]
async fn release_into_the_future_is_rejected() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2020, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let allocation = h.allocate(alice.id, atlas.id, 100, d(2024, 1, 1), None).await;

    let err = AllocationsService::release(
        &h.store,
        &h.cache,
        &ctx(d(2024, 6, 1)),
        allocation.id,
        ReleaseAllocationRequest {
            end_date: Some(d(2024, 8, 31)),
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(h.store.find_allocation(allocation.id).await.unwrap().is_some());

    // Scheduling the end on the allocation keeps the employee staffed
    // until then.
    AllocationsService::update(
        &h.store,
        &h.cache,
        allocation.id,
        UpdateAllocationRequest {
            end_date: Some(Some(d(2024, 8, 31))),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let before_end = EmployeesService::get(&h.store, &h.cache, &ctx(d(2024, 8, 2)), alice.id)
        .await
        .unwrap();
    assert_eq!(before_end.employee.utilization, 100);
    assert_eq!(before_end.employee.bench_days, 0);
    assert_eq!(before_end.employee.risk_tag, RiskTier::Healthy);

    let after_end = EmployeesService::get(&h.store, &h.cache, &ctx(d(2024, 9, 1)), alice.id)
        .await
        .unwrap();
    assert_eq!(after_end.employee.bench_days, 1);
    assert_eq!(after_end.employee.risk_tag, RiskTier::AtRisk);
}

#[tokio::test]
async fn empty_update_returns_allocation_unchanged() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2023, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let allocation = h.allocate(alice.id, atlas.id, 50, d(2024, 1, 1), None).await;
    let day = d(2024, 6, 1);
    EmployeesService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();

    let unchanged = AllocationsService::update(
        &h.store,
        &h.cache,
        allocation.id,
        UpdateAllocationRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(unchanged.id, allocation.id);
    assert_eq!(unchanged.utilization_percent, 50);
    assert_eq!(unchanged.end_date, None);
    assert!(h.cache.contains(&CacheKey::employee_list(day)).await);
}
