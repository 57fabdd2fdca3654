mod allocations;
mod cache;
mod dashboard;
mod employees;
mod projects;
mod transitions;

use chrono::NaiveDate;
use std::time::Duration;
use uuid::Uuid;
use workforce_backend::cache::ProjectionCache;
use workforce_backend::db::enums::{EmployeeStatus, EmploymentType, Entity, ProjectStatus};
use workforce_backend::db::models::{Allocation, Employee, NewAllocation, NewEmployee, NewProject, Project};
use workforce_backend::services::context::RequestContext;
use workforce_backend::store::{MemoryStore, WorkforceStore};

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn ctx(date: NaiveDate) -> RequestContext {
    RequestContext::anonymous(date)
}

pub struct Harness {
    pub store: MemoryStore,
    pub cache: ProjectionCache,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            cache: ProjectionCache::new(Duration::from_secs(300)),
        }
    }

    pub async fn employee(&self, name: &str, entity: Entity, hire_date: NaiveDate) -> Employee {
        self.store
            .insert_employee(NewEmployee {
                full_name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                entity,
                employment_type: EmploymentType::FullTime,
                status: EmployeeStatus::Active,
                skills: vec!["delivery".to_string()],
                hire_date: Some(hire_date),
            })
            .await
            .unwrap()
    }

    pub async fn project(&self, name: &str, status: ProjectStatus, start: Option<NaiveDate>) -> Project {
        self.store
            .insert_project(NewProject {
                name: name.to_string(),
                entity: Entity::Technology,
                status,
                start_date: start,
                end_date: None,
            })
            .await
            .unwrap()
    }

    pub async fn allocate(
        &self,
        employee_id: Uuid,
        project_id: Uuid,
        percent: i32,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Allocation {
        self.store
            .insert_allocation(NewAllocation {
                employee_id,
                project_id,
                utilization_percent: percent,
                start_date: start,
                end_date: end,
                role: None,
            })
            .await
            .unwrap()
    }
}
