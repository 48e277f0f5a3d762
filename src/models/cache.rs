use crate::models::clock::{Clock, SystemClock};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    /// Milliseconds since the Unix epoch at which the entry was stored.
    pub last_fetch: u64,
    pub data: Value,
}

/// Query-keyed cache of upstream JSON payloads.
///
/// Freshness is decided on read against the injected clock. Stale entries
/// are swept whenever a new entry is written.
pub struct QueryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
    ttl_millis: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DEFAULT_TTL)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl_millis: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_millis)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.lock().get(key).cloned()
    }

    /// Returns the payload only when the entry exists and is still fresh.
    pub fn get_fresh(&self, key: &str) -> Option<Value> {
        let entry = self.get(key)?;
        if self.is_stale(entry.last_fetch) {
            return None;
        }
        Some(entry.data)
    }

    pub fn put(&self, key: impl Into<String>, data: Value) {
        let now = self.clock.now_millis();
        let ttl = self.ttl_millis;
        let mut entries = self.lock();

        let swept = sweep(&mut entries, now, ttl);
        if swept > 0 {
            debug!("Swept {} stale cache entries", swept);
        }

        entries.insert(
            key.into(),
            CacheEntry {
                last_fetch: now,
                data,
            },
        );
    }

    pub fn is_stale(&self, last_fetch: u64) -> bool {
        self.clock.now_millis().saturating_sub(last_fetch) > self.ttl_millis
    }

    /// Drops every stale entry and returns how many were removed.
    pub fn purge_stale(&self) -> usize {
        let now = self.clock.now_millis();
        let ttl = self.ttl_millis;
        sweep(&mut self.lock(), now, ttl)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

fn sweep(entries: &mut HashMap<String, CacheEntry>, now: u64, ttl_millis: u64) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| now.saturating_sub(entry.last_fetch) <= ttl_millis);
    before - entries.len()
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
