//! Counters for genesis construction

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct ServiceMetrics {
    /// Constructions that returned a header
    pub constructions_succeeded: AtomicU64,

    /// Requests rejected with `InvalidSpec`
    pub invalid_specs: AtomicU64,

    /// Constructions that failed after validation
    pub constructions_failed: AtomicU64,

    /// Accounts committed across all successful constructions
    pub accounts_committed: AtomicU64,

    /// Total time spent in successful constructions (microseconds)
    pub construction_time_us: AtomicU64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, accounts: usize, elapsed: Duration) {
        self.constructions_succeeded.fetch_add(1, Ordering::Relaxed);
        self.accounts_committed
            .fetch_add(accounts as u64, Ordering::Relaxed);
        self.construction_time_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_invalid_spec(&self) {
        self.invalid_specs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.constructions_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            succeeded: self.constructions_succeeded.load(Ordering::Relaxed),
            invalid_specs: self.invalid_specs.load(Ordering::Relaxed),
            failed: self.constructions_failed.load(Ordering::Relaxed),
            accounts_committed: self.accounts_committed.load(Ordering::Relaxed),
        }
    }

    /// Average duration of a successful construction in microseconds.
    pub fn avg_construction_time_us(&self) -> f64 {
        let done = self.constructions_succeeded.load(Ordering::Relaxed);
        if done == 0 {
            return 0.0;
        }
        self.construction_time_us.load(Ordering::Relaxed) as f64 / done as f64
    }
}

/// Point-in-time copy of the counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub succeeded: u64,
    pub invalid_specs: u64,
    pub failed: u64,
    pub accounts_committed: u64,
}
