//! Cache keys and the declared write → projection dependency table.

use chrono::NaiveDate;
use std::fmt;
use uuid::Uuid;

/// Cached read projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    /// One employee's annotated view, keyed by employee.
    Employee,
    EmployeeList,
    /// Transitions of one employee, keyed by employee.
    EmployeeHistory,
    Project,
    ProjectList,
    /// Transitions on one project, keyed by project.
    TransitionHistory,
    /// Certifications of one employee, keyed by employee.
    Certifications,
    Dashboard,
}

/// Which identifier a keyed projection is scoped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubjectAxis {
    Employee,
    Project,
    Unscoped,
}

impl Projection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::Employee => "employee",
            Projection::EmployeeList => "employee_list",
            Projection::EmployeeHistory => "employee_history",
            Projection::Project => "project",
            Projection::ProjectList => "project_list",
            Projection::TransitionHistory => "transition_history",
            Projection::Certifications => "certifications",
            Projection::Dashboard => "dashboard",
        }
    }

    fn subject_axis(&self) -> SubjectAxis {
        match self {
            Projection::Employee | Projection::EmployeeHistory | Projection::Certifications => {
                SubjectAxis::Employee
            }
            Projection::Project | Projection::TransitionHistory => SubjectAxis::Project,
            Projection::EmployeeList | Projection::ProjectList | Projection::Dashboard => {
                SubjectAxis::Unscoped
            }
        }
    }
}

/// Persisted record types whose writes affect projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Employee,
    Allocation,
    Project,
    ProjectTransition,
    TransitionComment,
    Certification,
}

impl RecordKind {
    /// Projections derived from this record type.
    pub fn dependents(&self) -> &'static [Projection] {
        match self {
            RecordKind::Employee => &[
                Projection::Employee,
                Projection::EmployeeList,
                Projection::Dashboard,
            ],
            RecordKind::Allocation => &[
                Projection::Employee,
                Projection::EmployeeList,
                Projection::Project,
                Projection::Dashboard,
            ],
            // Project names and statuses show up in employee views.
            RecordKind::Project => &[
                Projection::Project,
                Projection::ProjectList,
                Projection::Employee,
                Projection::EmployeeList,
                Projection::Dashboard,
            ],
            // Transition end dates feed bench-day counts.
            RecordKind::ProjectTransition => &[
                Projection::Employee,
                Projection::EmployeeList,
                Projection::EmployeeHistory,
                Projection::TransitionHistory,
                Projection::Dashboard,
            ],
            RecordKind::TransitionComment => {
                &[Projection::EmployeeHistory, Projection::TransitionHistory]
            }
            RecordKind::Certification => &[Projection::Certifications],
        }
    }
}

/// Identifiers touched by a write. Unknown ids widen the invalidation to
/// every subject of the affected projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteScope {
    pub employee_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

impl WriteScope {
    pub fn employee(employee_id: Uuid) -> Self {
        Self {
            employee_id: Some(employee_id),
            project_id: None,
        }
    }

    pub fn project(project_id: Uuid) -> Self {
        Self {
            employee_id: None,
            project_id: Some(project_id),
        }
    }

    pub fn employee_on_project(employee_id: Uuid, project_id: Uuid) -> Self {
        Self {
            employee_id: Some(employee_id),
            project_id: Some(project_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub projection: Projection,
    pub subject: Option<Uuid>,
    pub reference_date: Option<NaiveDate>,
}

impl CacheKey {
    pub fn new(projection: Projection, subject: Option<Uuid>, reference_date: Option<NaiveDate>) -> Self {
        Self {
            projection,
            subject,
            reference_date,
        }
    }

    pub fn employee(employee_id: Uuid, reference_date: NaiveDate) -> Self {
        Self::new(Projection::Employee, Some(employee_id), Some(reference_date))
    }

    pub fn employee_list(reference_date: NaiveDate) -> Self {
        Self::new(Projection::EmployeeList, None, Some(reference_date))
    }

    pub fn employee_history(employee_id: Uuid) -> Self {
        Self::new(Projection::EmployeeHistory, Some(employee_id), None)
    }

    pub fn project(project_id: Uuid, reference_date: NaiveDate) -> Self {
        Self::new(Projection::Project, Some(project_id), Some(reference_date))
    }

    pub fn project_list(reference_date: NaiveDate) -> Self {
        Self::new(Projection::ProjectList, None, Some(reference_date))
    }

    pub fn transition_history(project_id: Uuid) -> Self {
        Self::new(Projection::TransitionHistory, Some(project_id), None)
    }

    pub fn certifications(employee_id: Uuid) -> Self {
        Self::new(Projection::Certifications, Some(employee_id), None)
    }

    pub fn dashboard(reference_date: NaiveDate) -> Self {
        Self::new(Projection::Dashboard, None, Some(reference_date))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projection:{}:", self.projection.as_str())?;
        match self.subject {
            Some(id) => write!(f, "{}:", id)?,
            None => f.write_str("all:")?,
        }
        match self.reference_date {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => f.write_str("undated"),
        }
    }
}

/// A projection to drop, for one subject or for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidationTarget {
    pub projection: Projection,
    pub subject: Option<Uuid>,
}

impl InvalidationTarget {
    pub fn matches(&self, key: &CacheKey) -> bool {
        key.projection == self.projection
            && (self.subject.is_none() || key.subject == self.subject)
    }

    /// Redis `KEYS` pattern covering the same entries.
    pub fn redis_pattern(&self) -> String {
        match self.subject {
            Some(id) => format!("projection:{}:{}:*", self.projection.as_str(), id),
            None => format!("projection:{}:*", self.projection.as_str()),
        }
    }
}

/// Resolves a write into the exact projections it can have changed.
pub fn invalidation_targets(kind: RecordKind, scope: WriteScope) -> Vec<InvalidationTarget> {
    kind.dependents()
        .iter()
        .map(|&projection| {
            let subject = match projection.subject_axis() {
                SubjectAxis::Employee => scope.employee_id,
                SubjectAxis::Project => scope.project_id,
                SubjectAxis::Unscoped => None,
            };
            InvalidationTarget {
                projection,
                subject,
            }
        })
        .collect()
}
