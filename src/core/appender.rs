//! Appender trait for log event destinations

use super::log_event::LogEvent;

/// A destination the host framework hands log events to.
///
/// `append` never fails from the caller's point of view: delivery problems
/// are reported through the appender's own error channel and the next event
/// is processed as usual.
pub trait Appender: Send + Sync {
    fn append(&self, event: &LogEvent);
    fn close(&self);
    fn name(&self) -> &str;
}
