use chrono::NaiveDate;

use crate::db::enums::EmployeeStatus;
use crate::db::models::{
    Allocation, AllocationQuery, Employee, Project, ProjectTransition, TransitionQuery,
};
use crate::error::AppResult;
use crate::store::WorkforceStore;
use crate::utilization::{OptimizationEmployee, effective_status, project_workforce};

/// One consistent load of every relation the workforce projections read.
pub struct WorkforceRecords {
    pub employees: Vec<Employee>,
    pub allocations: Vec<Allocation>,
    pub transitions: Vec<ProjectTransition>,
    pub projects: Vec<Project>,
}

impl WorkforceRecords {
    pub async fn load(store: &dyn WorkforceStore) -> AppResult<Self> {
        let (employees, allocations, transitions, projects) = futures::try_join!(
            store.list_employees(),
            store.list_allocations(AllocationQuery::default()),
            store.list_transitions(TransitionQuery::default()),
            store.list_projects(),
        )?;
        Ok(Self {
            employees,
            allocations,
            transitions,
            projects,
        })
    }

    pub fn project(&self, reference_date: NaiveDate) -> Vec<OptimizationEmployee> {
        project_workforce(
            &self.employees,
            &self.allocations,
            &self.transitions,
            &self.projects,
            reference_date,
        )
    }

    /// Projection of the employees that count towards KPIs. Archived
    /// employees are left out.
    pub fn project_counted(&self, reference_date: NaiveDate) -> Vec<OptimizationEmployee> {
        let counted: Vec<Employee> = self
            .employees
            .iter()
            .filter(|e| e.status != EmployeeStatus::Archived)
            .cloned()
            .collect();
        project_workforce(
            &counted,
            &self.allocations,
            &self.transitions,
            &self.projects,
            reference_date,
        )
    }

    /// Projects as a reader sees them on `reference_date`, with due
    /// proposals shown as active. Nothing is persisted.
    pub fn projects_as_of(&self, reference_date: NaiveDate) -> Vec<Project> {
        self.projects
            .iter()
            .cloned()
            .map(|mut p| {
                p.status = effective_status(&p, reference_date);
                p
            })
            .collect()
    }
}
