use chrono::NaiveDate;
use serde::Serialize;

use super::dates::days_between;
use crate::db::enums::TransitionStatus;

/// Transition fields as supplied by the caller, before finalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionDraft {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalizedTransition {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub status: TransitionStatus,
}

/// Computes the tenure length and fixes the terminal status.
///
/// With both dates present the duration is the calendar-day difference,
/// which equals `ceil((end - start) / 86400s)` between the two midnights
/// and cannot drift across DST changes. A caller-supplied duration is only
/// kept when one of the dates is missing.
pub fn finalize_transition(draft: TransitionDraft) -> FinalizedTransition {
    let duration_days = match (draft.start_date, draft.end_date) {
        // chrono's whole date range fits in i32 days
        (Some(start), Some(end)) => Some(days_between(start, end) as i32),
        _ => draft.duration_days,
    };

    FinalizedTransition {
        start_date: draft.start_date,
        end_date: draft.end_date,
        duration_days,
        status: TransitionStatus::Completed,
    }
}
