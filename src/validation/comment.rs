use crate::error::AppError;

use super::rules::MAX_TEXT_LENGTH;

pub fn validate_comment_body(body: &str) -> Result<(), AppError> {
    if body.trim().is_empty() {
        return Err(AppError::validation("Comment body is required"));
    }

    if body.chars().count() > MAX_TEXT_LENGTH {
        return Err(AppError::validation("Comment body is too long (max 10000 characters)"));
    }

    Ok(())
}
