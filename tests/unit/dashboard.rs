use super::{Harness, ctx, d};
use workforce_backend::cache::CacheKey;
use workforce_backend::db::enums::{EmployeeStatus, Entity, ProjectStatus};
use workforce_backend::db::models::employee::UpdateEmployeeStatusRequest;
use workforce_backend::services::{DashboardService, EmployeesService};

#[tokio::test]
async fn empty_workforce_yields_zeros() {
    let h = Harness::new();
    let today = ctx(d(2024, 6, 1));
    let kpis = DashboardService::kpis(&h.store, &h.cache, &today).await.unwrap();
    assert_eq!(kpis.total_employees, 0);
    assert_eq!(kpis.bench_percentage, 0.0);
    assert_eq!(kpis.active_projects, 0);
    assert_eq!(kpis.alerts_count, 0);

    let rows = DashboardService::entities(&h.store, &h.cache, &today).await.unwrap();
    assert_eq!(rows.len(), Entity::ALL.len());
    assert!(rows.iter().all(|r| r.headcount == 0 && r.average_utilization == 0.0));
}

#[tokio::test]
async fn kpis_count_bench_alerts_and_due_proposals() {
    let h = Harness::new();
    let alice = h.employee("Alice", Entity::Technology, d(2023, 1, 1)).await;
    h.employee("Bob", Entity::Technology, d(2024, 5, 25)).await;
    let atlas = h.project("Atlas", ProjectStatus::Active, None).await;
    h.project("Due", ProjectStatus::Proposal, Some(d(2024, 5, 1))).await;
    h.project("Later", ProjectStatus::Proposal, Some(d(2099, 1, 1))).await;
    h.allocate(alice.id, atlas.id, 90, d(2024, 1, 1), None).await;

    let kpis = DashboardService::kpis(&h.store, &h.cache, &ctx(d(2024, 6, 1)))
        .await
        .unwrap();
    assert_eq!(kpis.total_employees, 2);
    assert_eq!(kpis.bench_percentage, 50.0);
    assert_eq!(kpis.active_projects, 2);
    assert_eq!(kpis.alerts_count, 1);

    let rows = DashboardService::entities(&h.store, &h.cache, &ctx(d(2024, 6, 1)))
        .await
        .unwrap();
    assert_eq!(rows[0].entity, Entity::Technology);
    assert_eq!(rows[0].headcount, 2);
    assert_eq!(rows[0].average_utilization, 45.0);
    assert_eq!(rows[0].fully_utilized, 1);
    assert_eq!(rows[0].available, 1);
}

#[tokio::test]
async fn archived_employees_leave_the_kpis() {
    let h = Harness::new();
    let gone = h.employee("Gone", Entity::Operations, d(2020, 1, 1)).await;
    h.employee("Stays", Entity::Operations, d(2020, 1, 1)).await;
    let day = d(2024, 6, 1);

    let before = DashboardService::kpis(&h.store, &h.cache, &ctx(day)).await.unwrap();
    assert_eq!(before.total_employees, 2);

    EmployeesService::update_status(
        &h.store,
        &h.cache,
        gone.id,
        UpdateEmployeeStatusRequest {
            status: EmployeeStatus::Archived,
        },
    )
    .await
    .unwrap();
    assert!(!h.cache.contains(&CacheKey::dashboard(day)).await);

    let after = DashboardService::kpis(&h.store, &h.cache, &ctx(day)).await.unwrap();
    assert_eq!(after.total_employees, 1);
    assert_eq!(after.alerts_count, 1);

    let listed = EmployeesService::list(&h.store, &h.cache, &ctx(day)).await.unwrap();
    assert_eq!(listed.len(), 2);
}
