use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use super::overlap::is_active;
use crate::db::models::{Allocation, Project};

/// Sum of `utilization_percent` over allocations active on the reference
/// date. Over-allocation is preserved; the result is never clamped.
pub fn current_utilization(allocations: &[Allocation], reference_date: NaiveDate) -> i32 {
    allocations
        .iter()
        .filter(|a| is_active(*a, reference_date))
        .map(|a| a.utilization_percent)
        .sum()
}

/// Names of the projects behind the active allocations, deduplicated, in
/// allocation order. Allocations whose project is not in `projects` are
/// skipped.
pub fn active_project_names(
    allocations: &[Allocation],
    projects: &[Project],
    reference_date: NaiveDate,
) -> Vec<String> {
    let by_id: HashMap<Uuid, &Project> = projects.iter().map(|p| (p.id, p)).collect();
    let mut names: Vec<String> = Vec::new();
    for allocation in allocations.iter().filter(|a| is_active(*a, reference_date)) {
        if let Some(project) = by_id.get(&allocation.project_id) {
            if !names.iter().any(|n| n == &project.name) {
                names.push(project.name.clone());
            }
        }
    }
    names
}
