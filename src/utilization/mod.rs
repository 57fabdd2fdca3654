//! Staffing derivations: utilization, bench days, risk tiers and KPIs.
//!
//! Everything here is pure and synchronous. The reference date is always an
//! argument; nothing in this module reads the clock.

pub mod aggregator;
pub mod bench;
pub mod classifier;
pub mod dates;
pub mod kpi;
pub mod overlap;
pub mod project_status;
pub mod projection;
pub mod transition;

pub use aggregator::{active_project_names, current_utilization};
pub use bench::bench_days;
pub use classifier::{CapacityBucket, Classification, RiskTier, capacity_bucket, classify};
pub use kpi::{DashboardKpis, EntityRollup, entity_rollups, project_kpis};
pub use overlap::{DateRange, Dated, is_active};
pub use project_status::{effective_status, normalize_proposal_start, should_activate};
pub use projection::{OptimizationEmployee, project_employee, project_workforce};
pub use transition::{FinalizedTransition, TransitionDraft, finalize_transition};
