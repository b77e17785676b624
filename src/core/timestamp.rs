//! Event timestamp resolution
//!
//! Events may or may not carry the time they occurred. A missing value, or a
//! value of exactly `0`, means "unknown" and resolves to the current
//! wall-clock time of the resolving process.

use chrono::Utc;

/// Source of an event's occurrence time in milliseconds since the epoch.
pub trait EventTime {
    /// The recorded occurrence time, if the event has one.
    fn occurred_at_millis(&self) -> Option<i64>;
}

/// Current wall-clock time in milliseconds since the epoch.
#[inline]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Resolve the occurrence time of `event`, falling back to [`now_millis`].
pub fn resolve_timestamp<E: EventTime + ?Sized>(event: &E) -> i64 {
    match event.occurred_at_millis() {
        Some(millis) if millis != 0 => millis,
        _ => now_millis(),
    }
}
