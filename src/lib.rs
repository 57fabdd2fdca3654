pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;
pub mod utilization;
pub mod validation;

use crate::cache::ProjectionCache;
use crate::config::Config;
use crate::store::WorkforceStore;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WorkforceStore>,
    pub cache: Arc<ProjectionCache>,
    /// Projection mirror, when `REDIS_URL` is set.
    pub redis: Option<redis::Client>,
}

impl AppState {
    pub fn new(store: Arc<dyn WorkforceStore>, redis: Option<redis::Client>, config: &Config) -> Self {
        let ttl = Duration::from_secs(config.cache().ttl_seconds);
        let cache = match &redis {
            Some(client) => ProjectionCache::with_mirror(ttl, client.clone()),
            None => ProjectionCache::new(ttl),
        };
        Self {
            store,
            cache: Arc::new(cache),
            redis,
        }
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = match logging.level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt().with_max_level(level).json().init();
        }
        _ => {
            tracing_subscriber::fmt().with_max_level(level).init();
        }
    }
}
