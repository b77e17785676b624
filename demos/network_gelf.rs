//! Network GELF example
//!
//! Sends a few messages to a Graylog GELF input. Host and port default to
//! `udp:127.0.0.1` and 12201.
//!
//! Run with: cargo run --example network_gelf -- tcp:graylog.local 12201

use rust_gelf_appender::gelf_log;
use rust_gelf_appender::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "udp:127.0.0.1".to_string());
    let port = match args.next() {
        Some(port) => port
            .parse()
            .map_err(|_| GelfError::config("graylogPort", format!("not a port: {}", port)))?,
        None => 12201,
    };

    let appender = GelfAppender::builder("graylog")
        .options(ProviderOptions::new().with_facility("network-demo").with_extended_information(true))
        .sender_config(SenderConfig::from_graylog_host(&host, port)?)
        .build()?;

    for i in 0..5 {
        gelf_log!(appender, LogLevel::Info, "Heartbeat {}", i);
    }
    gelf_log!(appender, LogLevel::Error, "Large payload: {}", "x".repeat(10_000));

    let metrics = appender.metrics();
    tracing::info!(sent = metrics.sent_count(), failed = metrics.failed_count(), "done");

    appender.close();
    Ok(())
}
