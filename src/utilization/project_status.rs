use chrono::NaiveDate;

use super::dates::next_day;
use crate::db::enums::ProjectStatus;
use crate::db::models::Project;

/// Whether a proposal has reached its start date and should now be active.
///
/// Advisory only: callers decide whether to persist the change.
pub fn should_activate(project: &Project, today: NaiveDate) -> bool {
    project.status == ProjectStatus::Proposal
        && project.start_date.is_some_and(|start| start <= today)
}

/// Status a reader should see, with due proposals shown as active.
pub fn effective_status(project: &Project, today: NaiveDate) -> ProjectStatus {
    if should_activate(project, today) {
        ProjectStatus::Active
    } else {
        project.status
    }
}

/// Keeps proposals in the future: a proposal without a start date, or with
/// one on or before `today`, starts tomorrow. Other statuses pass through.
pub fn normalize_proposal_start(
    start_date: Option<NaiveDate>,
    status: ProjectStatus,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if status != ProjectStatus::Proposal {
        return start_date;
    }
    match start_date {
        Some(start) if start > today => Some(start),
        _ => Some(next_day(today)),
    }
}
