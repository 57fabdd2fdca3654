use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::context::RequestContext;
use crate::utilization::dates::parse_calendar_date;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";

#[derive(Deserialize, Default)]
struct AsOfParams {
    as_of: Option<String>,
}

/// Builds the request context from `?as_of=YYYY-MM-DD` (today in UTC when
/// absent) and the optional actor header.
#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<AsOfParams>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| params)
            .unwrap_or_default();

        let reference_date = match params.as_of.as_deref().map(str::trim) {
            None | Some("") => Utc::now().date_naive(),
            Some(raw) => parse_calendar_date(raw).ok_or_else(|| {
                AppError::validation(format!("as_of must be a YYYY-MM-DD date, got '{}'", raw))
                    .into_response()
            })?,
        };

        let actor_id = match parts.headers.get(ACTOR_ID_HEADER) {
            None => Uuid::nil(),
            Some(value) => value
                .to_str()
                .ok()
                .and_then(|v| Uuid::parse_str(v.trim()).ok())
                .ok_or_else(|| {
                    AppError::validation(format!("{} must be a UUID", ACTOR_ID_HEADER)).into_response()
                })?,
        };

        Ok(RequestContext::new(actor_id, reference_date))
    }
}
