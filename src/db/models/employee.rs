use crate::db::enums::{EmployeeStatus, EmploymentType, Entity};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Employee models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Employee {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub entity: Entity,
    pub employment_type: EmploymentType,
    pub status: EmployeeStatus,
    pub skills: Vec<String>,
    pub hire_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Day the employee became available for staffing.
    pub fn available_since(&self) -> NaiveDate {
        self.hire_date.unwrap_or_else(|| self.created_at.date_naive())
    }
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::employees)]
pub struct NewEmployee {
    pub full_name: String,
    pub email: String,
    pub entity: Entity,
    pub employment_type: EmploymentType,
    pub status: EmployeeStatus,
    pub skills: Vec<String>,
    pub hire_date: Option<NaiveDate>,
}

// Employee API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    pub full_name: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    pub entity: Entity,
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub skills: Vec<String>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct UpdateEmployeeStatusRequest {
    pub status: EmployeeStatus,
}
