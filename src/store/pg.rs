use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use super::WorkforceStore;
use crate::db::DbPool;
use crate::db::enums::EmployeeStatus;
use crate::db::models::{
    Allocation, AllocationChanges, AllocationQuery, AllocationWithProject, Certification,
    Employee, NewAllocation, NewCertification, NewEmployee, NewProject, NewProjectTransition,
    NewTransitionComment, Project, ProjectChanges, ProjectTransition, TransitionComment,
    TransitionQuery,
};
use crate::db::repositories::{
    allocations::AllocationsRepo, certifications::CertificationsRepo, employees::EmployeesRepo,
    projects::ProjectsRepo, transitions::TransitionsRepo,
};
use crate::error::AppResult;

/// Postgres-backed store. Diesel is synchronous, so every call checks a
/// connection out of the r2d2 pool on the blocking thread pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }
}

#[async_trait]
impl WorkforceStore for PgStore {
    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.run(|conn| Ok(EmployeesRepo::list(conn)?)).await
    }

    async fn find_employee(&self, id: Uuid) -> AppResult<Option<Employee>> {
        self.run(move |conn| Ok(EmployeesRepo::find_by_id(conn, id)?)).await
    }

    async fn employee_email_exists(&self, email: &str) -> AppResult<bool> {
        let email = email.to_string();
        self.run(move |conn| Ok(EmployeesRepo::exists_email(conn, &email)?)).await
    }

    async fn insert_employee(&self, employee: NewEmployee) -> AppResult<Employee> {
        self.run(move |conn| Ok(EmployeesRepo::insert(conn, &employee)?)).await
    }

    async fn update_employee_status(&self, id: Uuid, status: EmployeeStatus) -> AppResult<Employee> {
        self.run(move |conn| Ok(EmployeesRepo::update_status(conn, id, status)?)).await
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.run(|conn| Ok(ProjectsRepo::list(conn)?)).await
    }

    async fn find_project(&self, id: Uuid) -> AppResult<Option<Project>> {
        self.run(move |conn| Ok(ProjectsRepo::find_by_id(conn, id)?)).await
    }

    async fn project_name_exists(&self, name: &str) -> AppResult<bool> {
        let name = name.to_string();
        self.run(move |conn| Ok(ProjectsRepo::exists_name(conn, &name)?)).await
    }

    async fn insert_project(&self, project: NewProject) -> AppResult<Project> {
        self.run(move |conn| Ok(ProjectsRepo::insert(conn, &project)?)).await
    }

    async fn update_project(&self, id: Uuid, changes: ProjectChanges) -> AppResult<Project> {
        self.run(move |conn| Ok(ProjectsRepo::update_fields(conn, id, &changes)?)).await
    }

    async fn list_allocations(&self, query: AllocationQuery) -> AppResult<Vec<Allocation>> {
        self.run(move |conn| Ok(AllocationsRepo::list(conn, &query)?)).await
    }

    async fn list_allocations_with_projects(
        &self,
        query: AllocationQuery,
    ) -> AppResult<Vec<AllocationWithProject>> {
        self.run(move |conn| {
            let rows = AllocationsRepo::list_with_projects(conn, &query)?;
            Ok(rows
                .into_iter()
                .map(|(allocation, project)| AllocationWithProject { allocation, project })
                .collect())
        })
        .await
    }

    async fn find_allocation(&self, id: Uuid) -> AppResult<Option<Allocation>> {
        self.run(move |conn| Ok(AllocationsRepo::find_by_id(conn, id)?)).await
    }

    async fn insert_allocation(&self, allocation: NewAllocation) -> AppResult<Allocation> {
        self.run(move |conn| Ok(AllocationsRepo::insert(conn, &allocation)?)).await
    }

    async fn update_allocation(&self, id: Uuid, changes: AllocationChanges) -> AppResult<Allocation> {
        self.run(move |conn| Ok(AllocationsRepo::update_fields(conn, id, &changes)?)).await
    }

    async fn delete_allocation(&self, id: Uuid) -> AppResult<()> {
        self.run(move |conn| {
            AllocationsRepo::delete_by_id(conn, id)?;
            Ok(())
        })
        .await
    }

    async fn release_allocation(
        &self,
        allocation_id: Uuid,
        transition: NewProjectTransition,
    ) -> AppResult<ProjectTransition> {
        self.run(move |conn| {
            let created = conn.transaction::<_, diesel::result::Error, _>(|conn| {
                AllocationsRepo::delete_by_id(conn, allocation_id)?;
                TransitionsRepo::insert(conn, &transition)
            })?;
            Ok(created)
        })
        .await
    }

    async fn list_certifications(&self, employee_id: Uuid) -> AppResult<Vec<Certification>> {
        self.run(move |conn| Ok(CertificationsRepo::list_by_employee(conn, employee_id)?)).await
    }

    async fn find_certification(&self, id: Uuid) -> AppResult<Option<Certification>> {
        self.run(move |conn| Ok(CertificationsRepo::find_by_id(conn, id)?)).await
    }

    async fn insert_certification(&self, certification: NewCertification) -> AppResult<Certification> {
        self.run(move |conn| Ok(CertificationsRepo::insert(conn, &certification)?)).await
    }

    async fn delete_certification(&self, id: Uuid) -> AppResult<()> {
        self.run(move |conn| {
            CertificationsRepo::delete_by_id(conn, id)?;
            Ok(())
        })
        .await
    }

    async fn list_transitions(&self, query: TransitionQuery) -> AppResult<Vec<ProjectTransition>> {
        self.run(move |conn| Ok(TransitionsRepo::list(conn, &query)?)).await
    }

    async fn find_transition(&self, id: Uuid) -> AppResult<Option<ProjectTransition>> {
        self.run(move |conn| Ok(TransitionsRepo::find_by_id(conn, id)?)).await
    }

    async fn insert_transition(&self, transition: NewProjectTransition) -> AppResult<ProjectTransition> {
        self.run(move |conn| Ok(TransitionsRepo::insert(conn, &transition)?)).await
    }

    async fn delete_transition(&self, id: Uuid) -> AppResult<()> {
        self.run(move |conn| {
            TransitionsRepo::delete_by_id(conn, id)?;
            Ok(())
        })
        .await
    }

    async fn list_comments(&self, transition_id: Uuid) -> AppResult<Vec<TransitionComment>> {
        self.run(move |conn| Ok(TransitionsRepo::list_comments(conn, transition_id)?)).await
    }

    async fn insert_comment(&self, comment: NewTransitionComment) -> AppResult<TransitionComment> {
        self.run(move |conn| Ok(TransitionsRepo::insert_comment(conn, &comment)?)).await
    }
}
