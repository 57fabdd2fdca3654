use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::keys::{CacheKey, RecordKind, WriteScope, invalidation_targets};
use super::redis as mirror;
use crate::error::AppResult;

/// Issued when a read for `key` starts; required to store its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket {
    key: CacheKey,
    sequence: u64,
}

#[derive(Debug, Default)]
struct Slot {
    value: Option<(serde_json::Value, Instant)>,
    /// Sequence of the newest read started for this key.
    latest_read: u64,
    /// Sequence at which the key was last invalidated.
    invalidated_at: u64,
    /// Sequence of the read whose value was last stored.
    stored_at: u64,
}

impl Slot {
    /// Whether a read holding `sequence` may still store its result.
    fn accepts(&self, sequence: u64) -> bool {
        self.latest_read == sequence && self.invalidated_at <= sequence
    }

    /// The mirror may only answer for keys this process has not
    /// invalidated since it last stored a value.
    fn mirror_trusted(&self) -> bool {
        self.invalidated_at <= self.stored_at
    }
}

#[derive(Debug, Default)]
struct CacheState {
    slots: HashMap<CacheKey, Slot>,
    sequence: u64,
}

impl CacheState {
    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

/// In-process cache of derived read projections.
///
/// A read result is stored only if no newer read for the same key started
/// and the key was not invalidated while the read was in flight, so a slow
/// or abandoned read can never overwrite fresher state.
pub struct ProjectionCache {
    state: RwLock<CacheState>,
    ttl: Duration,
    mirror: Option<redis::Client>,
}

impl ProjectionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            ttl,
            mirror: None,
        }
    }

    /// Also writes entries to Redis and deletes them there on invalidation.
    pub fn with_mirror(ttl: Duration, client: redis::Client) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            ttl,
            mirror: Some(client),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let mirror_trusted = {
            let state = self.state.read().await;
            let slot = state.slots.get(key);
            if let Some((value, stored_at)) = slot.and_then(|s| s.value.as_ref()) {
                if stored_at.elapsed() < self.ttl {
                    debug!(key = %key, "projection cache hit");
                    return serde_json::from_value(value.clone()).ok();
                }
            }
            slot.is_none_or(Slot::mirror_trusted)
        };

        if let Some(client) = self.mirror.as_ref().filter(|_| mirror_trusted) {
            if let Some(value) = mirror::get_cache::<T>(client, &key.to_string()).await {
                debug!(key = %key, "projection mirror hit");
                return Some(value);
            }
        }

        debug!(key = %key, "projection cache miss");
        None
    }

    pub async fn begin_read(&self, key: CacheKey) -> ReadTicket {
        let mut state = self.state.write().await;
        let sequence = state.next_sequence();
        state.slots.entry(key).or_default().latest_read = sequence;
        ReadTicket { key, sequence }
    }

    /// Stores `value` under the ticket's key. Returns `false` and discards
    /// the value when the ticket has been superseded or invalidated.
    pub async fn complete_read<T: Serialize>(&self, ticket: ReadTicket, value: &T) -> bool {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %ticket.key, error = %e, "projection not serializable, skipping cache");
                return false;
            }
        };

        {
            let mut state = self.state.write().await;
            let slot = state.slots.entry(ticket.key).or_default();
            if !slot.accepts(ticket.sequence) {
                warn!(key = %ticket.key, "discarding stale projection read");
                return false;
            }
            slot.value = Some((json, Instant::now()));
            slot.stored_at = ticket.sequence;
        }

        if let Some(client) = &self.mirror {
            self.mirror_write(client, ticket, value).await;
        }
        true
    }

    /// Copies a stored value to Redis, then withdraws it again if the key
    /// was invalidated or re-read while the write was in flight.
    async fn mirror_write<T: Serialize>(&self, client: &redis::Client, ticket: ReadTicket, value: &T) {
        let redis_key = ticket.key.to_string();
        if let Err(e) = mirror::set_cache(client, &redis_key, value, self.ttl.as_secs()).await {
            warn!(key = %ticket.key, error = %e, "failed to mirror projection");
            return;
        }

        let superseded = {
            let state = self.state.read().await;
            state
                .slots
                .get(&ticket.key)
                .is_none_or(|slot| !slot.accepts(ticket.sequence))
        };
        if superseded {
            if let Err(e) = mirror::delete_cache(client, &redis_key).await {
                warn!(key = %ticket.key, error = %e, "failed to withdraw superseded mirror entry");
            }
        }
    }

    /// Serves `key` from cache, or runs `load` and caches its result.
    /// Loader errors propagate and cache nothing.
    pub async fn get_or_load<T, F, Fut>(&self, key: CacheKey, load: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(hit) = self.get::<T>(&key).await {
            return Ok(hit);
        }
        let ticket = self.begin_read(key).await;
        let value = load().await?;
        self.complete_read(ticket, &value).await;
        Ok(value)
    }

    /// Drops every projection the write could have changed. Returns the
    /// number of local entries removed.
    pub async fn invalidate(&self, kind: RecordKind, scope: WriteScope) -> usize {
        let targets = invalidation_targets(kind, scope);
        let removed = {
            let mut state = self.state.write().await;
            let sequence = state.next_sequence();
            let mut removed = 0;
            for (key, slot) in state.slots.iter_mut() {
                if targets.iter().any(|t| t.matches(key)) {
                    if slot.value.take().is_some() {
                        removed += 1;
                    }
                    slot.invalidated_at = sequence;
                }
            }
            removed
        };

        if let Some(client) = &self.mirror {
            for target in &targets {
                if let Err(e) = mirror::delete_pattern(client, &target.redis_pattern()).await {
                    warn!(pattern = %target.redis_pattern(), error = %e, "failed to clear mirrored projections");
                }
            }
        }

        debug!(kind = ?kind, removed, "invalidated projections");
        removed
    }

    pub async fn contains(&self, key: &CacheKey) -> bool {
        let state = self.state.read().await;
        state
            .slots
            .get(key)
            .and_then(|s| s.value.as_ref())
            .is_some_and(|(_, stored_at)| stored_at.elapsed() < self.ttl)
    }
}
