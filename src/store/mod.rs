//! Persistence boundary for workforce records.
//!
//! Services talk to a [`WorkforceStore`] rather than a connection so the
//! derivation and invalidation paths can run against [`MemoryStore`] in
//! tests and against Postgres through [`PgStore`] in production.

pub mod memory;
pub mod pg;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::enums::EmployeeStatus;
use crate::db::models::{
    Allocation, AllocationChanges, AllocationQuery, AllocationWithProject, Certification,
    Employee, NewAllocation, NewCertification, NewEmployee, NewProject, NewProjectTransition,
    NewTransitionComment, Project, ProjectChanges, ProjectTransition, TransitionComment,
    TransitionQuery,
};
use crate::error::AppResult;

pub use memory::MemoryStore;
pub use pg::PgStore;

#[async_trait]
pub trait WorkforceStore: Send + Sync {
    // Employees
    async fn list_employees(&self) -> AppResult<Vec<Employee>>;
    async fn find_employee(&self, id: Uuid) -> AppResult<Option<Employee>>;
    async fn employee_email_exists(&self, email: &str) -> AppResult<bool>;
    async fn insert_employee(&self, employee: NewEmployee) -> AppResult<Employee>;
    async fn update_employee_status(&self, id: Uuid, status: EmployeeStatus) -> AppResult<Employee>;

    // Projects
    async fn list_projects(&self) -> AppResult<Vec<Project>>;
    async fn find_project(&self, id: Uuid) -> AppResult<Option<Project>>;
    async fn project_name_exists(&self, name: &str) -> AppResult<bool>;
    async fn insert_project(&self, project: NewProject) -> AppResult<Project>;
    async fn update_project(&self, id: Uuid, changes: ProjectChanges) -> AppResult<Project>;

    // Allocations
    async fn list_allocations(&self, query: AllocationQuery) -> AppResult<Vec<Allocation>>;
    async fn list_allocations_with_projects(
        &self,
        query: AllocationQuery,
    ) -> AppResult<Vec<AllocationWithProject>>;
    async fn find_allocation(&self, id: Uuid) -> AppResult<Option<Allocation>>;
    async fn insert_allocation(&self, allocation: NewAllocation) -> AppResult<Allocation>;
    async fn update_allocation(&self, id: Uuid, changes: AllocationChanges) -> AppResult<Allocation>;
    async fn delete_allocation(&self, id: Uuid) -> AppResult<()>;

    /// Deletes the allocation and records the finished tenure in one unit
    /// of work. Either both happen or neither does.
    async fn release_allocation(
        &self,
        allocation_id: Uuid,
        transition: NewProjectTransition,
    ) -> AppResult<ProjectTransition>;

    // Certifications
    async fn list_certifications(&self, employee_id: Uuid) -> AppResult<Vec<Certification>>;
    async fn find_certification(&self, id: Uuid) -> AppResult<Option<Certification>>;
    async fn insert_certification(&self, certification: NewCertification) -> AppResult<Certification>;
    async fn delete_certification(&self, id: Uuid) -> AppResult<()>;

    // Transitions
    async fn list_transitions(&self, query: TransitionQuery) -> AppResult<Vec<ProjectTransition>>;
    async fn find_transition(&self, id: Uuid) -> AppResult<Option<ProjectTransition>>;
    async fn insert_transition(&self, transition: NewProjectTransition) -> AppResult<ProjectTransition>;
    async fn delete_transition(&self, id: Uuid) -> AppResult<()>;
    async fn list_comments(&self, transition_id: Uuid) -> AppResult<Vec<TransitionComment>>;
    async fn insert_comment(&self, comment: NewTransitionComment) -> AppResult<TransitionComment>;
}
