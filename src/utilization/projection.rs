use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::aggregator::{active_project_names, current_utilization};
use super::bench::bench_days;
use super::classifier::{CapacityBucket, RiskTier, capacity_bucket, classify};
use crate::db::enums::{EmployeeStatus, EmploymentType, Entity};
use crate::db::models::{Allocation, Employee, Project, ProjectTransition};

/// Read-only view of an employee with every derived staffing field.
/// Nothing here is ever written back to the employee record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OptimizationEmployee {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub entity: Entity,
    pub employment_type: EmploymentType,
    pub status: EmployeeStatus,
    pub skills: Vec<String>,
    pub utilization: i32,
    pub bench_days: i64,
    pub risk_tag: RiskTier,
    pub risk_rationale: String,
    pub capacity: CapacityBucket,
    pub active_projects: Vec<String>,
}

/// Annotates one employee. `allocations` and `transitions` may contain
/// other employees' records; only the employee's own are used.
pub fn project_employee(
    employee: &Employee,
    allocations: &[Allocation],
    transitions: &[ProjectTransition],
    projects: &[Project],
    reference_date: NaiveDate,
) -> OptimizationEmployee {
    let own_allocations: Vec<Allocation> = allocations
        .iter()
        .filter(|a| a.employee_id == employee.id)
        .cloned()
        .collect();
    let own_transitions: Vec<ProjectTransition> = transitions
        .iter()
        .filter(|t| t.employee_id == employee.id)
        .cloned()
        .collect();

    annotate(employee, &own_allocations, &own_transitions, projects, reference_date)
}

/// Annotates a whole workforce in one pass over the record sets.
pub fn project_workforce(
    employees: &[Employee],
    allocations: &[Allocation],
    transitions: &[ProjectTransition],
    projects: &[Project],
    reference_date: NaiveDate,
) -> Vec<OptimizationEmployee> {
    let mut allocations_by_employee: HashMap<Uuid, Vec<Allocation>> = HashMap::new();
    for allocation in allocations {
        allocations_by_employee
            .entry(allocation.employee_id)
            .or_default()
            .push(allocation.clone());
    }
    let mut transitions_by_employee: HashMap<Uuid, Vec<ProjectTransition>> = HashMap::new();
    for transition in transitions {
        transitions_by_employee
            .entry(transition.employee_id)
            .or_default()
            .push(transition.clone());
    }

    employees
        .iter()
        .map(|employee| {
            let own_allocations = allocations_by_employee
                .get(&employee.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let own_transitions = transitions_by_employee
                .get(&employee.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            annotate(employee, own_allocations, own_transitions, projects, reference_date)
        })
        .collect()
}

fn annotate(
    employee: &Employee,
    allocations: &[Allocation],
    transitions: &[ProjectTransition],
    projects: &[Project],
    reference_date: NaiveDate,
) -> OptimizationEmployee {
    let utilization = current_utilization(allocations, reference_date);
    let bench = bench_days(
        employee.available_since(),
        allocations,
        transitions,
        reference_date,
    );
    let classification = classify(utilization, bench);

    OptimizationEmployee {
        id: employee.id,
        full_name: employee.full_name.clone(),
        email: employee.email.clone(),
        entity: employee.entity,
        employment_type: employee.employment_type,
        status: employee.status,
        skills: employee.skills.clone(),
        utilization,
        bench_days: bench,
        risk_tag: classification.tier,
        risk_rationale: classification.rationale,
        capacity: capacity_bucket(utilization),
        active_projects: active_project_names(allocations, projects, reference_date),
    }
}
