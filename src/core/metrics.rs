//! Delivery metrics for observability
//!
//! Counts messages an appender delivered and messages whose delivery failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Delivery counters for one appender
///
/// # Example
///
/// ```
/// use rust_gelf_appender::AppenderMetrics;
///
/// let metrics = AppenderMetrics::new();
/// metrics.record_sent();
/// metrics.record_failed();
///
/// assert_eq!(metrics.sent_count(), 1);
/// assert_eq!(metrics.failed_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct AppenderMetrics {
    /// Messages accepted by the sender
    sent_count: AtomicU64,

    /// Messages rejected as invalid or lost to I/O failure
    failed_count: AtomicU64,
}

impl AppenderMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            sent_count: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    /// Record a delivered message, returning the previous count
    #[inline]
    pub fn record_sent(&self) -> u64 {
        self.sent_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed delivery, returning the previous count
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been dispatched.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count() as f64;
        let total = self.sent_count() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.sent_count.store(0, Ordering::Relaxed);
        self.failed_count.store(0, Ordering::Relaxed);
    }
}
