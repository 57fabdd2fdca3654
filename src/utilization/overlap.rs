//! Date-range activity checks for time-boxed records.

use chrono::NaiveDate;

use crate::db::models::Allocation;

/// Inclusive calendar range; `end == None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end.is_none_or(|end| end >= date)
    }

    /// Whether the two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.end.is_none_or(|end| end >= other.start) && other.end.is_none_or(|end| end >= self.start)
    }
}

/// Records that occupy a calendar range.
pub trait Dated {
    fn date_range(&self) -> DateRange;
}

impl Dated for Allocation {
    fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl Dated for DateRange {
    fn date_range(&self) -> DateRange {
        *self
    }
}

pub fn is_active<T: Dated + ?Sized>(record: &T, reference_date: NaiveDate) -> bool {
    record.date_range().contains(reference_date)
}
