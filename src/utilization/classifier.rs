//! Bench/risk tiers and capacity buckets.
//!
//! The two classifications answer different questions and must not be
//! mixed: risk tiers drive HR alerts, capacity buckets drive "who can take
//! more work" views.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bench days beyond which a zero-utilization employee is flagged for
/// layoff consideration.
pub const LAYOFF_BENCH_DAYS: i64 = 30;
/// Utilization below this needs review.
pub const REVIEW_UTILIZATION_PERCENT: i32 = 50;
pub const FULLY_UTILIZED_PERCENT: i32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskTier {
    Healthy,
    ReviewRequired,
    AtRisk,
    LayoffConsideration,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Healthy => "healthy",
            RiskTier::ReviewRequired => "review-required",
            RiskTier::AtRisk => "at-risk",
            RiskTier::LayoffConsideration => "layoff-consideration",
        }
    }

    pub fn is_alert(&self) -> bool {
        *self != RiskTier::Healthy
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub tier: RiskTier,
    pub rationale: String,
}

/// Maps utilization and consecutive bench days to a risk tier.
///
/// Rules are checked in order and the first match wins, so a long bench
/// stint at 0% is always `LayoffConsideration`, never `AtRisk`.
pub fn classify(utilization: i32, bench_days: i64) -> Classification {
    let (tier, rationale) = if bench_days > LAYOFF_BENCH_DAYS && utilization == 0 {
        (
            RiskTier::LayoffConsideration,
            format!(">{} days bench, 0% utilization", LAYOFF_BENCH_DAYS),
        )
    } else if bench_days > 0 && utilization == 0 {
        (
            RiskTier::AtRisk,
            format!("{} days bench, 0% utilization", bench_days),
        )
    } else if utilization < REVIEW_UTILIZATION_PERCENT {
        (
            RiskTier::ReviewRequired,
            format!("{}% utilization <{}%", utilization, REVIEW_UTILIZATION_PERCENT),
        )
    } else {
        (RiskTier::Healthy, format!("{}% utilization", utilization))
    };

    Classification { tier, rationale }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapacityBucket {
    FullyUtilized,
    PartiallyUtilized,
    Available,
}

pub fn capacity_bucket(utilization: i32) -> CapacityBucket {
    if utilization >= FULLY_UTILIZED_PERCENT {
        CapacityBucket::FullyUtilized
    } else if utilization >= REVIEW_UTILIZATION_PERCENT {
        CapacityBucket::PartiallyUtilized
    } else {
        CapacityBucket::Available
    }
}
