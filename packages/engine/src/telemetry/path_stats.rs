//! Path statistics tracking with cache-padded atomic counters
//!
//! Compiled paths are shared across threads, so every counter is padded to
//! its own cache line.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crossbeam_utils::CachePadded;
use once_cell::sync::Lazy;
use serde::Serialize;

static GLOBAL_STATS: Lazy<PathStats> = Lazy::new(PathStats::new);

/// Process-wide path statistics
pub fn global_stats() -> &'static PathStats {
    &GLOBAL_STATS
}

/// Thread-safe path statistics
#[derive(Debug)]
pub struct PathStats {
    /// Paths compiled from scratch
    pub compilations: CachePadded<AtomicU64>,
    /// Compilations avoided by a memoized compiled path
    pub cache_hits: CachePadded<AtomicU64>,
    /// Late-bound parameter bindings performed
    pub bindings: CachePadded<AtomicU64>,
    /// Select invocations
    pub selects: CachePadded<AtomicU64>,
    /// Transform invocations
    pub transforms: CachePadded<AtomicU64>,
    /// Invocations that ended in an error
    pub failures: CachePadded<AtomicU64>,
    /// When collection started
    pub start_time: Instant,
}

/// Immutable snapshot of path statistics at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStatsSnapshot {
    pub compilations: u64,
    pub cache_hits: u64,
    pub bindings: u64,
    pub selects: u64,
    pub transforms: u64,
    pub failures: u64,
    /// Milliseconds since collection started
    pub uptime_ms: u64,
}

impl Default for PathStats {
    fn default() -> Self {
        Self::new()
    }
}

impl PathStats {
    /// Create new, zeroed statistics
    #[must_use]
    pub fn new() -> Self {
        Self {
            compilations: CachePadded::new(AtomicU64::new(0)),
            cache_hits: CachePadded::new(AtomicU64::new(0)),
            bindings: CachePadded::new(AtomicU64::new(0)),
            selects: CachePadded::new(AtomicU64::new(0)),
            transforms: CachePadded::new(AtomicU64::new(0)),
            failures: CachePadded::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Record a compilation
    #[inline]
    pub fn record_compilation(&self) {
        self.compilations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a memoized compiled path being reused
    #[inline]
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a parameter binding
    #[inline]
    pub fn record_binding(&self) {
        self.bindings.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a select invocation and whether it succeeded
    #[inline]
    pub fn record_select(&self, ok: bool) {
        self.selects.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a transform invocation and whether it succeeded
    #[inline]
    pub fn record_transform(&self, ok: bool) {
        self.transforms.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Time since collection started
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Read every counter with relaxed ordering
    #[inline]
    pub fn snapshot(&self) -> PathStatsSnapshot {
        PathStatsSnapshot {
            compilations: self.compilations.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            bindings: self.bindings.load(Ordering::Relaxed),
            selects: self.selects.load(Ordering::Relaxed),
            transforms: self.transforms.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            uptime_ms: u64::try_from(self.uptime().as_millis()).unwrap_or(u64::MAX),
        }
    }
}
