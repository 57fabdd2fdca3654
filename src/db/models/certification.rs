use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::certifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Certification {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub name: String,
    pub issuer: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::certifications)]
pub struct NewCertification {
    pub employee_id: Uuid,
    pub name: String,
    pub issuer: Option<String>,
    pub valid_until: Option<NaiveDate>,
}

#[derive(Deserialize, Validate)]
pub struct CreateCertificationRequest {
    #[validate(length(min = 1, max = 255, message = "Certification name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "Issuer must be 255 characters or less"))]
    pub issuer: Option<String>,
    pub valid_until: Option<NaiveDate>,
}
