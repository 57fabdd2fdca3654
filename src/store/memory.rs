use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::WorkforceStore;
use crate::db::enums::EmployeeStatus;
use crate::db::models::{
    Allocation, AllocationChanges, AllocationOrder, AllocationQuery, AllocationWithProject,
    Certification, Employee, NewAllocation, NewCertification, NewEmployee, NewProject,
    NewProjectTransition, NewTransitionComment, Project, ProjectChanges, ProjectTransition,
    TransitionComment, TransitionQuery,
};
use crate::error::{AppError, AppResult};

/// Postgres refuses an `UPDATE` with nothing to set; mirror that here.
fn empty_changeset() -> AppError {
    AppError::Database(diesel::result::Error::QueryBuilderError(
        "There are no changes to save".into(),
    ))
}

#[derive(Default)]
struct Tables {
    employees: Vec<Employee>,
    projects: Vec<Project>,
    allocations: Vec<Allocation>,
    certifications: Vec<Certification>,
    transitions: Vec<ProjectTransition>,
    comments: Vec<TransitionComment>,
}

/// In-process store with the same ordering guarantees as [`super::PgStore`].
/// Writes can be made to fail on demand to exercise error paths.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable("writes are disabled".to_string()));
        }
        Ok(())
    }
}

fn allocation_matches(allocation: &Allocation, query: &AllocationQuery) -> bool {
    query.employee_id.is_none_or(|id| allocation.employee_id == id)
        && query.project_id.is_none_or(|id| allocation.project_id == id)
}

fn sort_allocations(allocations: &mut [Allocation], order: AllocationOrder) {
    match order {
        AllocationOrder::StartDateAsc => {
            allocations.sort_by_key(|a| (a.start_date, a.created_at));
        }
        AllocationOrder::StartDateDesc => {
            allocations.sort_by_key(|a| Reverse((a.start_date, a.created_at)));
        }
    }
}

#[async_trait]
impl WorkforceStore for MemoryStore {
    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        let mut employees = self.tables.read().await.employees.clone();
        employees.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(employees)
    }

    async fn find_employee(&self, id: Uuid) -> AppResult<Option<Employee>> {
        let tables = self.tables.read().await;
        Ok(tables.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn employee_email_exists(&self, email: &str) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.employees.iter().any(|e| e.email == email))
    }

    async fn insert_employee(&self, employee: NewEmployee) -> AppResult<Employee> {
        self.check_writable()?;
        let created = Employee {
            id: Uuid::new_v4(),
            full_name: employee.full_name,
            email: employee.email,
            entity: employee.entity,
            employment_type: employee.employment_type,
            status: employee.status,
            skills: employee.skills,
            hire_date: employee.hire_date,
            created_at: Utc::now(),
        };
        self.tables.write().await.employees.push(created.clone());
        Ok(created)
    }

    async fn update_employee_status(&self, id: Uuid, status: EmployeeStatus) -> AppResult<Employee> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let employee = tables
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found("Employee"))?;
        employee.status = status;
        Ok(employee.clone())
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        let mut projects = self.tables.read().await.projects.clone();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    async fn find_project(&self, id: Uuid) -> AppResult<Option<Project>> {
        let tables = self.tables.read().await;
        Ok(tables.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn project_name_exists(&self, name: &str) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.projects.iter().any(|p| p.name == name))
    }

    async fn insert_project(&self, project: NewProject) -> AppResult<Project> {
        self.check_writable()?;
        let created = Project {
            id: Uuid::new_v4(),
            name: project.name,
            entity: project.entity,
            status: project.status,
            start_date: project.start_date,
            end_date: project.end_date,
            created_at: Utc::now(),
        };
        self.tables.write().await.projects.push(created.clone());
        Ok(created)
    }

    async fn update_project(&self, id: Uuid, changes: ProjectChanges) -> AppResult<Project> {
        self.check_writable()?;
        if changes.is_empty() {
            return Err(empty_changeset());
        }
        let mut tables = self.tables.write().await;
        let project = tables
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Project"))?;
        if let Some(name) = changes.name {
            project.name = name;
        }
        if let Some(entity) = changes.entity {
            project.entity = entity;
        }
        if let Some(status) = changes.status {
            project.status = status;
        }
        if let Some(start_date) = changes.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            project.end_date = end_date;
        }
        Ok(project.clone())
    }

    async fn list_allocations(&self, query: AllocationQuery) -> AppResult<Vec<Allocation>> {
        let tables = self.tables.read().await;
        let mut allocations: Vec<Allocation> = tables
            .allocations
            .iter()
            .filter(|a| allocation_matches(a, &query))
            .cloned()
            .collect();
        sort_allocations(&mut allocations, query.order);
        Ok(allocations)
    }

    async fn list_allocations_with_projects(
        &self,
        query: AllocationQuery,
    ) -> AppResult<Vec<AllocationWithProject>> {
        let allocations = self.list_allocations(query).await?;
        let tables = self.tables.read().await;
        Ok(allocations
            .into_iter()
            .filter_map(|allocation| {
                let project = tables.projects.iter().find(|p| p.id == allocation.project_id)?;
                Some(AllocationWithProject {
                    project: project.clone(),
                    allocation,
                })
            })
            .collect())
    }

    async fn find_allocation(&self, id: Uuid) -> AppResult<Option<Allocation>> {
        let tables = self.tables.read().await;
        Ok(tables.allocations.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_allocation(&self, allocation: NewAllocation) -> AppResult<Allocation> {
        self.check_writable()?;
        let created = Allocation {
            id: Uuid::new_v4(),
            employee_id: allocation.employee_id,
            project_id: allocation.project_id,
            utilization_percent: allocation.utilization_percent,
            start_date: allocation.start_date,
            end_date: allocation.end_date,
            role: allocation.role,
            created_at: Utc::now(),
        };
        self.tables.write().await.allocations.push(created.clone());
        Ok(created)
    }

    async fn update_allocation(&self, id: Uuid, changes: AllocationChanges) -> AppResult<Allocation> {
        self.check_writable()?;
        if changes.is_empty() {
            return Err(empty_changeset());
        }
        let mut tables = self.tables.write().await;
        let allocation = tables
            .allocations
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found("Allocation"))?;
        if let Some(percent) = changes.utilization_percent {
            allocation.utilization_percent = percent;
        }
        if let Some(start_date) = changes.start_date {
            allocation.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            allocation.end_date = end_date;
        }
        if let Some(role) = changes.role {
            allocation.role = role;
        }
        Ok(allocation.clone())
    }

    async fn delete_allocation(&self, id: Uuid) -> AppResult<()> {
        self.check_writable()?;
        self.tables.write().await.allocations.retain(|a| a.id != id);
        Ok(())
    }

    async fn release_allocation(
        &self,
        allocation_id: Uuid,
        transition: NewProjectTransition,
    ) -> AppResult<ProjectTransition> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        tables.allocations.retain(|a| a.id != allocation_id);
        let created = materialize_transition(transition);
        tables.transitions.push(created.clone());
        Ok(created)
    }

    async fn list_certifications(&self, employee_id: Uuid) -> AppResult<Vec<Certification>> {
        let tables = self.tables.read().await;
        let mut certifications: Vec<Certification> = tables
            .certifications
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .cloned()
            .collect();
        // None sorts after every date.
        certifications.sort_by(|a, b| {
            (a.valid_until.is_none(), a.valid_until, &a.name)
                .cmp(&(b.valid_until.is_none(), b.valid_until, &b.name))
        });
        Ok(certifications)
    }

    async fn find_certification(&self, id: Uuid) -> AppResult<Option<Certification>> {
        let tables = self.tables.read().await;
        Ok(tables.certifications.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_certification(&self, certification: NewCertification) -> AppResult<Certification> {
        self.check_writable()?;
        let created = Certification {
            id: Uuid::new_v4(),
            employee_id: certification.employee_id,
            name: certification.name,
            issuer: certification.issuer,
            valid_until: certification.valid_until,
            created_at: Utc::now(),
        };
        self.tables.write().await.certifications.push(created.clone());
        Ok(created)
    }

    async fn delete_certification(&self, id: Uuid) -> AppResult<()> {
        self.check_writable()?;
        self.tables.write().await.certifications.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_transitions(&self, query: TransitionQuery) -> AppResult<Vec<ProjectTransition>> {
        let tables = self.tables.read().await;
        let mut transitions: Vec<ProjectTransition> = tables
            .transitions
            .iter()
            .filter(|t| {
                query.employee_id.is_none_or(|id| t.employee_id == id)
                    && query.project_id.is_none_or(|id| t.project_id == id)
            })
            .cloned()
            .collect();
        // Open tenures first, then most recent end date.
        transitions.sort_by_key(|t| {
            (
                t.end_date.is_some(),
                Reverse(t.end_date),
                Reverse(t.created_at),
            )
        });
        Ok(transitions)
    }

    async fn find_transition(&self, id: Uuid) -> AppResult<Option<ProjectTransition>> {
        let tables = self.tables.read().await;
        Ok(tables.transitions.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_transition(&self, transition: NewProjectTransition) -> AppResult<ProjectTransition> {
        self.check_writable()?;
        let created = materialize_transition(transition);
        self.tables.write().await.transitions.push(created.clone());
        Ok(created)
    }

    async fn delete_transition(&self, id: Uuid) -> AppResult<()> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        tables.comments.retain(|c| c.transition_id != id);
        tables.transitions.retain(|t| t.id != id);
        Ok(())
    }

    async fn list_comments(&self, transition_id: Uuid) -> AppResult<Vec<TransitionComment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.transition_id == transition_id)
            .cloned()
            .collect())
    }

    async fn insert_comment(&self, comment: NewTransitionComment) -> AppResult<TransitionComment> {
        self.check_writable()?;
        let created = TransitionComment {
            id: Uuid::new_v4(),
            transition_id: comment.transition_id,
            author_id: comment.author_id,
            body: comment.body,
            created_at: Utc::now(),
        };
        self.tables.write().await.comments.push(created.clone());
        Ok(created)
    }
}

fn materialize_transition(transition: NewProjectTransition) -> ProjectTransition {
    ProjectTransition {
        id: Uuid::new_v4(),
        employee_id: transition.employee_id,
        project_id: transition.project_id,
        start_date: transition.start_date,
        end_date: transition.end_date,
        duration_days: transition.duration_days,
        status: transition.status,
        notes: transition.notes,
        created_at: Utc::now(),
    }
}
