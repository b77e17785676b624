//! # Rust GELF Appender
//!
//! Translates structured log events into GELF (Graylog Extended Log Format)
//! messages and delivers them to Graylog or the console.
//!
//! ## Features
//!
//! - **Deterministic encoding**: severity mapping, short message truncation,
//!   stack trace folding and context enrichment follow fixed rules
//! - **Interchangeable senders**: console, chunked UDP and framed TCP behind
//!   one `GelfSender` capability
//! - **Never throws at the caller**: delivery failures are reported through
//!   an error handler and counted
//!
//! ## Example
//!
//! ```
//! use rust_gelf_appender::prelude::*;
//!
//! let appender = GelfAppender::builder("console")
//!     .options(ProviderOptions::new().with_origin_host("web-1"))
//!     .sender(ConsoleSender::new(Target::Stdout))
//!     .build()?;
//!
//! appender.append(&LogEvent::new(LogLevel::Info, "service started"));
//! # Ok::<(), GelfError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;
pub mod senders;

pub mod prelude {
    pub use crate::appenders::{AppenderConfig, GelfAppender, GelfAppenderBuilder};
    pub use crate::core::{
        build_message, Appender, AppenderMetrics, ErrorHandler, GelfError, GelfMessage, LogEvent,
        LogLevel, ProviderOptions, RecordingErrorHandler, Result, SourceLocation, ThrownError,
        TracingErrorHandler,
    };
    pub use crate::senders::{ConsoleSender, GelfSender, SenderConfig, Target};
    #[cfg(feature = "network")]
    pub use crate::senders::{TcpSender, UdpSender};
}

pub use crate::appenders::{AppenderConfig, GelfAppender, GelfAppenderBuilder};
pub use crate::core::{
    build_message, syslog_equivalent, Appender, AppenderMetrics, ErrorHandler, GelfError,
    GelfMessage, LogEvent, LogLevel, ProviderOptions, RecordingErrorHandler, Result,
    SourceLocation, ThrownError, TracingErrorHandler,
};
pub use crate::senders::{ConsoleSender, GelfSender, SenderConfig, Target};
