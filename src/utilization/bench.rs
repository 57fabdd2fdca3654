use chrono::NaiveDate;

use super::aggregator::current_utilization;
use super::dates::days_between;
use crate::db::models::{Allocation, ProjectTransition};

/// Consecutive calendar days the employee has spent at 0% utilization as of
/// `reference_date`.
///
/// Every allocation or transition that has started counts as engagement up
/// to its end date, capped at the reference date; a tenure still running on
/// the reference date (or without an end) yields 0. The bench starts the day
/// after the latest engaged day. An employee who was never engaged has been
/// on the bench since `available_since` (hire date, or record creation when
/// unknown).
pub fn bench_days(
    available_since: NaiveDate,
    allocations: &[Allocation],
    transitions: &[ProjectTransition],
    reference_date: NaiveDate,
) -> i64 {
    if current_utilization(allocations, reference_date) > 0 {
        return 0;
    }

    let engaged_through =
        |end: Option<NaiveDate>| end.map_or(reference_date, |end| end.min(reference_date));
    let allocation_ends = allocations
        .iter()
        .filter(|a| a.start_date <= reference_date)
        .map(|a| engaged_through(a.end_date));
    let transition_ends = transitions
        .iter()
        .filter(|t| t.start_date.is_none_or(|start| start <= reference_date))
        .filter(|t| t.start_date.is_some() || t.end_date.is_some())
        .map(|t| engaged_through(t.end_date));

    let anchor = allocation_ends
        .chain(transition_ends)
        .max()
        .unwrap_or(available_since);

    days_between(anchor, reference_date).max(0)
}
