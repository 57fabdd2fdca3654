pub mod keys;
pub mod projection;
pub mod redis;

pub use keys::{CacheKey, InvalidationTarget, Projection, RecordKind, WriteScope, invalidation_targets};
pub use projection::{ProjectionCache, ReadTicket};
