// Sub-modules organized by record type
pub mod allocation;
pub mod api;
pub mod certification;
pub mod employee;
pub mod project;
pub mod transition;

pub use allocation::*;
pub use api::*;
pub use certification::*;
pub use employee::*;
pub use project::*;
pub use transition::*;

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial-update payloads.
pub(crate) fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
