pub mod allocation;
pub mod certification;
pub mod comment;
pub mod employee;
pub mod project;
pub mod transition;

use axum::{
    Json, async_trait,
    extract::FromRequest,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    db::models::api::{ApiResponse, ErrorDetail},
    error::AppError,
};

/// JSON body extractor that runs the payload's `Validate` rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            AppError::validation(format!("Invalid JSON body: {}", e)).into_response()
        })?;

        value
            .validate()
            .map_err(|errors| validation_error_response(error_details(&errors)).into_response())?;

        Ok(ValidatedJson(value))
    }
}

pub fn error_details(errors: &validator::ValidationErrors) -> Vec<ErrorDetail> {
    let mut details: Vec<ErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| ErrorDetail {
                field: Some(field.to_string()),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

pub fn validation_error_response(errors: Vec<ErrorDetail>) -> (StatusCode, Json<ApiResponse<()>>) {
    let response = ApiResponse::validation_error(errors);
    (StatusCode::BAD_REQUEST, Json(response))
}

/// Shared checks used by the per-resource validators.
pub mod rules {
    use chrono::NaiveDate;

    use crate::error::AppError;

    pub const MAX_NAME_LENGTH: usize = 255;
    pub const MAX_TEXT_LENGTH: usize = 10000;

    pub fn require_name(label: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::validation(format!("{} is required", label)));
        }
        if value.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::validation(format!(
                "{} must be {} characters or less",
                label, MAX_NAME_LENGTH
            )));
        }
        Ok(())
    }

    pub fn limit_text(label: &str, value: Option<&str>) -> Result<(), AppError> {
        if value.is_some_and(|v| v.chars().count() > MAX_TEXT_LENGTH) {
            return Err(AppError::validation(format!(
                "{} is too long (max {} characters)",
                label, MAX_TEXT_LENGTH
            )));
        }
        Ok(())
    }

    /// An end date, when present, may not precede the start date.
    pub fn date_order(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), AppError> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(AppError::validation("End date cannot be before start date"));
            }
        }
        Ok(())
    }

}
