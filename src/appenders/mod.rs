//! Appender implementations

pub mod gelf;

pub use gelf::{AppenderConfig, GelfAppender, GelfAppenderBuilder, SEND_FAILURE_MESSAGE};

// Re-export the trait so appenders can be used from this module alone
pub use crate::core::Appender;
