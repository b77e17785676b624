//! Error reporting hook
//!
//! Delivery failures are never raised to the code that logged the event.
//! They are handed to an [`ErrorHandler`] instead, which forwards them to the
//! host framework's own error channel.

use super::error::GelfError;
use parking_lot::Mutex;

pub trait ErrorHandler: Send + Sync {
    /// Report a non-fatal failure for the appender called `appender`.
    fn error(&self, appender: &str, message: &str, cause: Option<&GelfError>);
}

/// Reports errors as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorHandler;

impl ErrorHandler for TracingErrorHandler {
    fn error(&self, appender: &str, message: &str, cause: Option<&GelfError>) {
        match cause {
            Some(cause) => tracing::error!(appender, error = %cause, "{}", message),
            None => tracing::error!(appender, "{}", message),
        }
    }
}

/// A reported error as captured by [`RecordingErrorHandler`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    pub appender: String,
    pub message: String,
    pub cause: Option<String>,
}

/// Keeps every reported error in memory.
///
/// Useful for hosts that surface appender errors themselves, and in tests.
#[derive(Debug, Default)]
pub struct RecordingErrorHandler {
    reports: Mutex<Vec<ReportedError>>,
}

impl RecordingErrorHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<ReportedError> {
        self.reports.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl ErrorHandler for RecordingErrorHandler {
    fn error(&self, appender: &str, message: &str, cause: Option<&GelfError>) {
        self.reports.lock().push(ReportedError {
            appender: appender.to_string(),
            message: message.to_string(),
            cause: cause.map(ToString::to_string),
        });
    }
}
