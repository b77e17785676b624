//! Macros for building events at the call site.
//!
//! Events created through these macros carry the caller's file, line and
//! module path, and use the module path as the logger name.
//!
//! # Examples
//!
//! ```
//! use rust_gelf_appender::prelude::*;
//! use rust_gelf_appender::{gelf_event, gelf_log};
//!
//! let event = gelf_event!(LogLevel::Warn, "Retry attempt {} of {}", 3, 5);
//! assert_eq!(event.rendered_message(), "Retry attempt 3 of 5");
//! assert!(event.location.is_some());
//!
//! let appender = GelfAppender::builder("console")
//!     .options(ProviderOptions::new().with_origin_host("web-1"))
//!     .sender(ConsoleSender::new(Target::Stdout))
//!     .build()
//!     .unwrap();
//! gelf_log!(appender, LogLevel::Info, "Server listening on port {}", 8080);
//! ```

/// Build a [`LogEvent`](crate::LogEvent) stamped with the call-site location.
#[macro_export]
macro_rules! gelf_event {
    ($level:expr, $($arg:tt)+) => {
        $crate::LogEvent::new($level, format!($($arg)+))
            .with_logger_name(module_path!())
            .with_location(
                $crate::SourceLocation::new(file!(), line!()).with_module_path(module_path!()),
            )
    };
}

/// Build an event with [`gelf_event!`] and append it to an appender.
#[macro_export]
macro_rules! gelf_log {
    ($appender:expr, $level:expr, $($arg:tt)+) => {
        $crate::Appender::append(&$appender, &$crate::gelf_event!($level, $($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::GelfAppender;
    use crate::core::{LogLevel, RecordingErrorHandler};
    use std::sync::Arc;

    #[test]
    fn test_gelf_event_location() {
        let event = gelf_event!(LogLevel::Debug, "Counter value: {}", 10);
        let location = event.location.as_ref().unwrap();

        assert_eq!(event.level, LogLevel::Debug);
        assert_eq!(event.rendered_message(), "Counter value: 10");
        assert!(location.file.ends_with("macros.rs"));
        assert!(location.line > 0);
        assert_eq!(location.module_path.as_deref(), Some(module_path!()));
        assert_eq!(event.logger_name, module_path!());
    }

    #[test]
    fn test_gelf_log_reports_without_sender() {
        let handler = Arc::new(RecordingErrorHandler::new());
        let appender = GelfAppender::builder("macro")
            .error_handler(handler.clone())
            .resolve_origin_host(false)
            .build()
            .unwrap();

        gelf_log!(appender, LogLevel::Error, "Error code: {}", 500);
        assert_eq!(handler.len(), 1);
    }
}
