//! Console GELF example
//!
//! Writes GELF messages as JSON lines to standard output.
//!
//! Run with: cargo run --example console_gelf

use rust_gelf_appender::prelude::*;
use rust_gelf_appender::{gelf_event, gelf_log};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let options = ProviderOptions::new()
        .with_facility("console-demo")
        .with_extract_stacktrace(true)
        .with_extended_information(true)
        .with_additional_fields_str("{'environment': 'DEV', 'application': 'console-demo'}")?;

    let appender = GelfAppender::builder("console")
        .options(options)
        .sender(ConsoleSender::new(Target::Stdout))
        .build()?;

    gelf_log!(appender, LogLevel::Info, "Service started on port {}", 8080);
    gelf_log!(appender, LogLevel::Warn, "Low disk space: {}% used", 91);

    let event = gelf_event!(LogLevel::Error, "Failed to load configuration")
        .with_context_value("config_path", "/etc/demo.toml")
        .push_context("startup")
        .with_thrown(ThrownError::from_error(&std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        )));
    appender.append(&event);

    let metrics = appender.metrics();
    eprintln!(
        "sent: {}, failed: {}",
        metrics.sent_count(),
        metrics.failed_count()
    );

    appender.close();
    Ok(())
}
