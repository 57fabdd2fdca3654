use crate::db::models::project::{CreateProjectRequest, Project, UpdateProjectRequest};
use crate::error::AppError;

use super::rules::{date_order, require_name};

pub fn validate_create_project(req: &CreateProjectRequest) -> Result<(), AppError> {
    require_name("Project name", &req.name)?;
    date_order(req.start_date, req.end_date)
}

/// Checks the update against the stored project so that a partial change
/// cannot leave the range inverted.
pub fn validate_update_project(existing: &Project, req: &UpdateProjectRequest) -> Result<(), AppError> {
    if let Some(name) = &req.name {
        require_name("Project name", name)?;
    }
    let start = req.start_date.unwrap_or(existing.start_date);
    let end = req.end_date.unwrap_or(existing.end_date);
    date_order(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::{Entity, ProjectStatus};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn create(name: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> CreateProjectRequest {
        CreateProjectRequest {
            name: name.to_string(),
            entity: Entity::Consulting,
            status: ProjectStatus::Active,
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_create_project_validation() {
        assert!(validate_create_project(&create("Atlas", Some(d(2024, 1, 1)), None)).is_ok());
        assert!(validate_create_project(&create("", None, None)).is_err());
        assert!(validate_create_project(&create("Atlas", Some(d(2024, 2, 1)), Some(d(2024, 1, 1)))).is_err());
    }

    #[test]
    fn update_is_checked_against_stored_dates() {
        let existing = Project {
            id: Uuid::new_v4(),
            name: "Atlas".to_string(),
            entity: Entity::Consulting,
            status: ProjectStatus::Active,
            start_date: Some(d(2024, 3, 1)),
            end_date: None,
            created_at: Utc::now(),
        };
        let inverted = UpdateProjectRequest {
            end_date: Some(Some(d(2024, 2, 1))),
            ..Default::default()
        };
        assert!(validate_update_project(&existing, &inverted).is_err());

        let cleared = UpdateProjectRequest {
            start_date: Some(None),
            end_date: Some(Some(d(2024, 2, 1))),
            ..Default::default()
        };
        assert!(validate_update_project(&existing, &cleared).is_ok());
    }
}
