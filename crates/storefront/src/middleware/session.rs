//! Session middleware configuration.
//!
//! Visitor state (cart, chat transcript, workshop selections, API key) lives
//! in a bounded in-memory store and is lost on restart.
//!
//! Records are weighed by the size of their serialized data, so a handful of
//! sessions holding 4K workshop renders count for as much as thousands of
//! small carts. Once [`SESSION_STORE_CAPACITY_KIB`] is reached the least
//! useful records are evicted, and records idle for longer than the cookie
//! expiry are dropped whether or not the store is full.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "kk_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Total weight of all stored sessions, in KiB (256 MiB).
pub const SESSION_STORE_CAPACITY_KIB: u64 = 256 * 1024;

/// In-memory session store backed by a `moka` cache.
#[derive(Debug, Clone)]
pub struct MokaSessionStore {
    cache: Cache<Id, Record>,
}

impl MokaSessionStore {
    /// A store holding at most `capacity_kib` KiB of session data, dropping
    /// records nobody has touched for `time_to_idle`.
    #[must_use]
    pub fn new(capacity_kib: u64, time_to_idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity_kib)
            .weigher(|_id: &Id, record: &Record| record_weight_kib(record))
            .time_to_idle(time_to_idle)
            .build();
        Self { cache }
    }

    /// Apply pending evictions and report the stored weight in KiB.
    pub async fn weighted_size(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.weighted_size()
    }
}

impl Default for MokaSessionStore {
    fn default() -> Self {
        Self::new(SESSION_STORE_CAPACITY_KIB, session_idle_timeout())
    }
}

#[async_trait]
impl SessionStore for MokaSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .cache
            .get(session_id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}

/// Approximate size of a record's data, rounded up to whole KiB.
fn record_weight_kib(record: &Record) -> u32 {
    let bytes: usize = record
        .data
        .iter()
        .map(|(key, value)| key.len() + value.to_string().len())
        .sum();
    u32::try_from(bytes.div_ceil(1024).max(1)).unwrap_or(u32::MAX)
}

fn session_idle_timeout() -> Duration {
    Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs())
}

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaSessionStore> {
    SessionManagerLayer::new(MokaSessionStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
