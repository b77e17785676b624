//! Core event model and GELF encoding

pub mod appender;
pub mod config;
pub mod error;
pub mod error_handler;
pub mod gelf_message;
pub mod log_event;
pub mod log_level;
pub mod message_builder;
pub mod metrics;
pub mod severity;
pub mod thrown;
pub mod timestamp;

pub use appender::Appender;
pub use config::{local_hostname, parse_additional_fields, ProviderOptions, ORIGIN_HOST_KEY};
pub use error::{GelfError, Result};
pub use error_handler::{ErrorHandler, RecordingErrorHandler, ReportedError, TracingErrorHandler};
pub use gelf_message::{GelfMessage, GELF_VERSION};
pub use log_event::{LogEvent, SourceLocation};
pub use log_level::LogLevel;
pub use message_builder::{build_message, truncate_short_message, MAX_SHORT_MESSAGE_LENGTH};
pub use metrics::AppenderMetrics;
pub use severity::syslog_equivalent;
pub use thrown::ThrownError;
pub use timestamp::{resolve_timestamp, EventTime};
