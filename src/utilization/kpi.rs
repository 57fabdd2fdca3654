use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::classifier::CapacityBucket;
use super::projection::OptimizationEmployee;
use crate::db::enums::{Entity, ProjectStatus};
use crate::db::models::Project;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardKpis {
    pub total_employees: usize,
    pub bench_percentage: f64,
    pub active_projects: usize,
    pub alerts_count: usize,
}

/// One heatmap row. Rows always come out in `Entity::ALL` order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EntityRollup {
    pub entity: Entity,
    pub headcount: usize,
    pub average_utilization: f64,
    pub bench_count: usize,
    pub bench_percentage: f64,
    pub alerts_count: usize,
    pub active_projects: usize,
    pub fully_utilized: usize,
    pub partially_utilized: usize,
    pub available: usize,
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

fn count_active_projects<'a>(projects: impl Iterator<Item = &'a Project>) -> usize {
    projects
        .filter(|p| p.status == ProjectStatus::Active)
        .map(|p| p.id)
        .collect::<HashSet<Uuid>>()
        .len()
}

/// Dashboard summary. An empty workforce yields zero bench percentage and
/// zero alerts.
pub fn project_kpis(employees: &[OptimizationEmployee], projects: &[Project]) -> DashboardKpis {
    let bench = employees.iter().filter(|e| e.utilization == 0).count();
    let alerts = employees.iter().filter(|e| e.risk_tag.is_alert()).count();

    DashboardKpis {
        total_employees: employees.len(),
        bench_percentage: percentage(bench, employees.len()),
        active_projects: count_active_projects(projects.iter()),
        alerts_count: alerts,
    }
}

pub fn entity_rollups(
    employees: &[OptimizationEmployee],
    projects: &[Project],
) -> Vec<EntityRollup> {
    Entity::ALL
        .iter()
        .map(|&entity| {
            let members: Vec<&OptimizationEmployee> =
                employees.iter().filter(|e| e.entity == entity).collect();
            let headcount = members.len();
            let total_utilization: i64 = members.iter().map(|e| i64::from(e.utilization)).sum();
            let bench_count = members.iter().filter(|e| e.utilization == 0).count();
            let bucket_count =
                |bucket: CapacityBucket| members.iter().filter(|e| e.capacity == bucket).count();

            EntityRollup {
                entity,
                headcount,
                average_utilization: if headcount == 0 {
                    0.0
                } else {
                    total_utilization as f64 / headcount as f64
                },
                bench_count,
                bench_percentage: percentage(bench_count, headcount),
                alerts_count: members.iter().filter(|e| e.risk_tag.is_alert()).count(),
                active_projects: count_active_projects(
                    projects.iter().filter(|p| p.entity == entity),
                ),
                fully_utilized: bucket_count(CapacityBucket::FullyUtilized),
                partially_utilized: bucket_count(CapacityBucket::PartiallyUtilized),
                available: bucket_count(CapacityBucket::Available),
            }
        })
        .collect()
}
