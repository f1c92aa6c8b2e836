//! Lock-free session counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters updated concurrently by every session operation.
#[derive(Debug, Default)]
pub struct SessionStats {
    queries: AtomicU64,
    memory_updates: AtomicU64,
    cache_hits: AtomicU64,
}

/// Point-in-time copy of [`SessionStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub queries: u64,
    pub memory_updates: u64,
    pub cache_hits: u64,
}

/// Returned by `end()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub duration_minutes: f64,
    pub queries: u64,
    pub memory_updates: u64,
    pub cache_hits: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    /// A query answered from the resident index.
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_memory_update(&self) {
        self.memory_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            memory_updates: self.memory_updates.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }
}

impl SessionSummary {
    pub fn new(duration_minutes: f64, stats: StatsSnapshot) -> Self {
        Self {
            duration_minutes,
            queries: stats.queries,
            memory_updates: stats.memory_updates,
            cache_hits: stats.cache_hits,
        }
    }
}
