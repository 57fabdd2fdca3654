use super::{Harness, ctx, d};
use workforce_backend::cache::CacheKey;
use workforce_backend::db::enums::{EmployeeStatus, EmploymentType, Entity, ProjectStatus};
use workforce_backend::db::models::api::error_codes;
use workforce_backend::db::models::employee::{CreateEmployeeRequest, UpdateEmployeeStatusRequest};
use workforce_backend::error::AppError;
use workforce_backend::services::EmployeesService;
use workforce_backend::utilization::{CapacityBucket, RiskTier};

fn create_request(name: &str, email: &str) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        full_name: name.to_string(),
        email: email.to_string(),
        entity: Entity::Consulting,
        employment_type: EmploymentType::Contractor,
        skills: vec!["sql".to_string(), "SQL".to_string()],
        hire_date: Some(d(2024, 1, 1)),
    }
}

#[tokio::test]
async fn over_allocated_employee_is_reported_as_is_and_healthy() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2022, 1, 1)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    let borealis = h.project("Borealis", ProjectStatus::Active, None).await;
    h.allocate(alice.id, atlas.id, 30, d(2024, 1, 1), None).await;
    h.allocate(alice.id, borealis.id, 80, d(2024, 5, 1), Some(d(2024, 12, 31))).await;

    let today = ctx(d(2024, 6, 1));
    let list = EmployeesService::list(&h.store, &h.cache, &today).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].utilization, 110);
    assert_eq!(list[0].bench_days, 0);
    assert_eq!(list[0].risk_tag, RiskTier::Healthy);
    assert_eq!(list[0].capacity, CapacityBucket::FullyUtilized);

    let detail = EmployeesService::get(&h.store, &h.cache, &today, alice.id).await.unwrap();
    assert_eq!(detail.employee.utilization, 110);
    assert_eq!(detail.allocations.len(), 2);
    assert_eq!(detail.allocations[0].project.name, "Atlas");
}

#[tokio::test]
async fn derivation_follows_the_requested_date() {
    let h = Harness::new();
    let ben = h.employee("Ben", Entity::Operations, d(2024, 1, 1)).await;
    let comet = h.project("Comet", ProjectStatus::Active, None).await;
    h.allocate(ben.id, comet.id, 60, d(2024, 2, 1), Some(d(2024, 2, 29))).await;

    let during = EmployeesService::get(&h.store, &h.cache, &ctx(d(2024, 2, 29)), ben.id)
        .await
        .unwrap();
    assert_eq!(during.employee.utilization, 60);

    let after = EmployeesService::get(&h.store, &h.cache, &ctx(d(2024, 4, 4)), ben.id)
        .await
        .unwrap();
    assert_eq!(after.employee.utilization, 0);
    assert_eq!(after.employee.bench_days, 35);
    assert_eq!(after.employee.risk_tag, RiskTier::LayoffConsideration);
    assert!(after.employee.active_projects.is_empty());
}

#[tokio::test]
async fn reads_are_cached_per_reference_date() {
    let h = Harness::new();
    h.employee("Cleo", Entity::Technology, d(2024, 1, 1)).await;
    let day = d(2024, 3, 1);

    EmployeesService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();
    assert!(h.cache.contains(&CacheKey::employee_list(day)).await);
    assert!(!h.cache.contains(&CacheKey::employee_list(d(2024, 3, 2))).await);
}

#[tokio::test]
async fn create_normalizes_and_rejects_duplicate_email() {
    let h = Harness::new();
    let created = EmployeesService::create(
        &h.store,
        &h.cache,
        create_request("  Dana Scully ", "Dana@Example.com"),
    )
    .await
    .unwrap();
    assert_eq!(created.full_name, "Dana Scully");
    assert_eq!(created.email, "dana@example.com");
    assert_eq!(created.skills, vec!["sql"]);
    assert_eq!(created.status, EmployeeStatus::Active);

    let err = EmployeesService::create(&h.store, &h.cache, create_request("Dana", "dana@example.com"))
        .await
        .unwrap_err();
    match err {
        AppError::Conflict { code, .. } => {
            assert_eq!(code.as_deref(), Some(error_codes::EMPLOYEE_EMAIL_EXISTS))
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn status_change_invalidates_employee_projections() {
    let h = Harness::new();
    let eve = h.employee("Eve", Entity::SharedServices, d(2023, 6, 1)).await;
    let day = d(2024, 3, 1);
    EmployeesService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();

    let updated = EmployeesService::update_status(
        &h.store,
        &h.cache,
        eve.id,
        UpdateEmployeeStatusRequest {
            status: EmployeeStatus::OnHold,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, EmployeeStatus::OnHold);
    assert!(!h.cache.contains(&CacheKey::employee_list(day)).await);

    let list = EmployeesService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();
    assert_eq!(list[0].status, EmployeeStatus::OnHold);
}

#[tokio::test]
async fn unknown_employee_is_not_found() {
    let h = Harness::new();
    let err = EmployeesService::history(&h.store, &h.cache, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}
