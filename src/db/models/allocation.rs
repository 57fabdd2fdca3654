use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::project::Project;

// Allocation models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::allocations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Allocation {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub project_id: Uuid,
    pub utilization_percent: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::allocations)]
pub struct NewAllocation {
    pub employee_id: Uuid,
    pub project_id: Uuid,
    pub utilization_percent: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub role: Option<String>,
}

#[derive(AsChangeset, Default, Clone, Debug)]
#[diesel(table_name = crate::schema::allocations)]
pub struct AllocationChanges {
    pub utilization_percent: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub role: Option<Option<String>>,
}

impl AllocationChanges {
    pub fn is_empty(&self) -> bool {
        self.utilization_percent.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.role.is_none()
    }
}

/// Allocation joined with the project it staffs.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AllocationWithProject {
    #[serde(flatten)]
    pub allocation: Allocation,
    pub project: Project,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationOrder {
    #[default]
    StartDateAsc,
    StartDateDesc,
}

/// Read filter for allocations; unset fields do not constrain the query.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct AllocationQuery {
    pub employee_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    #[serde(default)]
    pub order: AllocationOrder,
}

impl AllocationQuery {
    pub fn for_employee(employee_id: Uuid) -> Self {
        Self {
            employee_id: Some(employee_id),
            ..Self::default()
        }
    }

    pub fn for_project(project_id: Uuid) -> Self {
        Self {
            project_id: Some(project_id),
            ..Self::default()
        }
    }
}

// Allocation API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateAllocationRequest {
    pub employee_id: Uuid,
    pub project_id: Uuid,
    #[validate(range(min = 1, max = 100, message = "Utilization must be between 1 and 100"))]
    pub utilization_percent: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(length(max = 255, message = "Role must be 255 characters or less"))]
    pub role: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateAllocationRequest {
    pub utilization_percent: Option<i32>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::deserialize_some")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "super::deserialize_some")]
    pub role: Option<Option<String>>,
}

/// Removes an employee from the allocation's project.
#[derive(Deserialize, Default)]
pub struct ReleaseAllocationRequest {
    /// Last day on the project; defaults to the request's reference date.
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
