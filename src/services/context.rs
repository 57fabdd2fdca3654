use chrono::NaiveDate;
use uuid::Uuid;

/// Per-request inputs every service call receives.
///
/// `reference_date` is read once at the request boundary so that every
/// derived value in one response is computed against the same day.
#[derive(Clone, Debug)]
pub struct RequestContext {
    /// Caller recorded as the author of comments. Nil when anonymous.
    pub actor_id: Uuid,
    pub reference_date: NaiveDate,
}

impl RequestContext {
    pub fn new(actor_id: Uuid, reference_date: NaiveDate) -> Self {
        Self {
            actor_id,
            reference_date,
        }
    }

    pub fn anonymous(reference_date: NaiveDate) -> Self {
        Self::new(Uuid::nil(), reference_date)
    }
}
