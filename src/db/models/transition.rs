use crate::db::enums::TransitionStatus;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ProjectTransition models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::project_transitions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectTransition {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub project_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub status: TransitionStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::project_transitions)]
pub struct NewProjectTransition {
    pub employee_id: Uuid,
    pub project_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub status: TransitionStatus,
    pub notes: Option<String>,
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::transition_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TransitionComment {
    pub id: Uuid,
    pub transition_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::transition_comments)]
pub struct NewTransitionComment {
    pub transition_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
}

// Transition API DTOs
#[derive(Deserialize)]
pub struct CreateTransitionRequest {
    pub employee_id: Uuid,
    pub project_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Only honored when one of the dates is missing.
    pub duration_days: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

/// Transition with its comment thread, oldest comment first.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TransitionWithComments {
    #[serde(flatten)]
    pub transition: ProjectTransition,
    pub comments: Vec<TransitionComment>,
}

/// Read filter for transitions; results are ordered by `end_date`
/// descending with open tenures first.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransitionQuery {
    pub employee_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}
