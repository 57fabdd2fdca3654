use crate::db::models::certification::CreateCertificationRequest;
use crate::error::AppError;

use super::rules::require_name;

pub fn validate_create_certification(req: &CreateCertificationRequest) -> Result<(), AppError> {
    require_name("Certification name", &req.name)?;
    if req.issuer.as_deref().is_some_and(|i| i.trim().is_empty()) {
        return Err(AppError::validation("Issuer cannot be blank"));
    }
    Ok(())
}
