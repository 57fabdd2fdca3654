use chrono::NaiveDate;

use crate::db::models::allocation::{
    Allocation, AllocationChanges, CreateAllocationRequest, UpdateAllocationRequest,
};
use crate::error::AppError;

use super::rules::{MAX_NAME_LENGTH, date_order};

pub fn validate_utilization(percent: i32) -> Result<(), AppError> {
    if !(1..=100).contains(&percent) {
        return Err(AppError::validation("Utilization must be between 1 and 100"));
    }
    Ok(())
}

fn validate_role(role: Option<&str>) -> Result<(), AppError> {
    if role.is_some_and(|r| r.chars().count() > MAX_NAME_LENGTH) {
        return Err(AppError::validation("Role must be 255 characters or less"));
    }
    Ok(())
}

pub fn validate_create_allocation(req: &CreateAllocationRequest) -> Result<(), AppError> {
    validate_utilization(req.utilization_percent)?;
    validate_role(req.role.as_deref())?;
    date_order(Some(req.start_date), req.end_date)
}

/// Validates a partial update against the stored allocation and returns the
/// changeset to persist.
pub fn validate_update_allocation(
    existing: &Allocation,
    req: UpdateAllocationRequest,
) -> Result<AllocationChanges, AppError> {
    if let Some(percent) = req.utilization_percent {
        validate_utilization(percent)?;
    }
    if let Some(role) = &req.role {
        validate_role(role.as_deref())?;
    }
    let start = req.start_date.unwrap_or(existing.start_date);
    let end = req.end_date.unwrap_or(existing.end_date);
    date_order(Some(start), end)?;

    Ok(AllocationChanges {
        utilization_percent: req.utilization_percent,
        start_date: req.start_date,
        end_date: req.end_date,
        role: req.role,
    })
}

/// A release ends the tenure no earlier than its start and no later than
/// the reference date; a later end is an allocation end-date update.
pub fn validate_release(
    allocation: &Allocation,
    end_date: NaiveDate,
    reference_date: NaiveDate,
) -> Result<(), AppError> {
    if end_date < allocation.start_date {
        return Err(AppError::validation(
            "Release date cannot be before the allocation start date",
        ));
    }
    if end_date > reference_date {
        return Err(AppError::validation(
            "Release date cannot be in the future; set the allocation end date instead",
        ));
    }
    Ok(())
}
