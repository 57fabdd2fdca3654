use crate::db::models::transition::CreateTransitionRequest;
use crate::error::AppError;

use super::rules::{date_order, limit_text};

pub fn validate_create_transition(req: &CreateTransitionRequest) -> Result<(), AppError> {
    date_order(req.start_date, req.end_date)?;
    if req.duration_days.is_some_and(|days| days < 0) {
        return Err(AppError::validation("Duration cannot be negative"));
    }
    limit_text("Notes", req.notes.as_deref())
}
