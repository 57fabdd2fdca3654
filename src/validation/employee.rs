use crate::db::models::employee::CreateEmployeeRequest;
use crate::error::AppError;

use super::rules::require_name;

pub fn validate_create_employee(req: &CreateEmployeeRequest) -> Result<(), AppError> {
    require_name("Full name", &req.full_name)?;
    if req.skills.iter().any(|s| s.trim().is_empty()) {
        return Err(AppError::validation("Skills cannot contain blank entries"));
    }
    Ok(())
}

/// Trims skills and drops repeats, keeping first-seen order.
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills.iter().map(|s| s.trim()) {
        if !normalized.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            normalized.push(skill.to_string());
        }
    }
    normalized
}
