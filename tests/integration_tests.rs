//! Integration tests for the GELF appender
//!
//! These tests verify:
//! - Event to message translation scenarios end to end
//! - Console delivery through an injected writer
//! - UDP and TCP delivery over loopback sockets
//! - Error reporting without interrupting the event stream
//! - Configuration loading

use parking_lot::Mutex;
#[cfg(feature = "network")]
use rust_gelf_appender::appenders::AppenderConfig;
use rust_gelf_appender::appenders::{GelfAppender, SEND_FAILURE_MESSAGE};
use rust_gelf_appender::core::message_builder::{LOGGER_NAME, LOGGER_NDC, STACKTRACE_SEPARATOR, THREAD_NAME};
use rust_gelf_appender::core::{
    build_message, Appender, LogEvent, LogLevel, ProviderOptions, RecordingErrorHandler,
    SourceLocation, ThrownError,
};
#[cfg(feature = "network")]
use rust_gelf_appender::core::GelfError;
use rust_gelf_appender::senders::{ConsoleSender, GelfSender, Target};
#[cfg(feature = "network")]
use rust_gelf_appender::senders::{TcpSender, UdpSender};
use std::io::{self, Write};
#[cfg(feature = "network")]
use std::io::{BufRead, BufReader, Read};
#[cfg(feature = "network")]
use std::net::{TcpListener, UdpSocket};
use std::sync::Arc;
#[cfg(feature = "network")]
use std::time::Duration;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().clone();
        String::from_utf8(bytes)
            .expect("console output is UTF-8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is JSON"))
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn console_appender(options: ProviderOptions) -> (GelfAppender, SharedBuffer, Arc<RecordingErrorHandler>) {
    let buffer = SharedBuffer::default();
    let handler = Arc::new(RecordingErrorHandler::new());
    let appender = GelfAppender::builder("console")
        .options(options)
        .sender(ConsoleSender::with_writer(Target::Stdout, buffer.clone()))
        .error_handler(handler.clone())
        .build()
        .expect("Failed to build appender");
    (appender, buffer, handler)
}

#[test]
fn test_info_event_scenario() {
    let event = LogEvent::new(LogLevel::Info, "hello").with_timestamp_millis(1_700_000_000_000);
    let msg = build_message(&event, &ProviderOptions::new());

    assert_eq!(msg.level(), 6);
    assert_eq!(msg.short_message(), "hello");
    assert_eq!(msg.full_message(), "hello");
    assert!(msg.field(THREAD_NAME).is_none());
    assert!(msg.field(LOGGER_NAME).is_none());
}

#[test]
fn test_long_message_scenario() {
    let text = "a".repeat(300);
    let msg = build_message(&LogEvent::new(LogLevel::Info, text.clone()), &ProviderOptions::new());

    assert_eq!(msg.short_message(), "a".repeat(249));
    assert_eq!(msg.full_message(), text);
}

#[test]
fn test_stacktrace_scenario() {
    let thrown = ThrownError::new("java.lang.IllegalStateException", "connection pool exhausted")
        .with_frames(["Pool.acquire(Pool.java:88)", "Service.handle(Service.java:12)"]);
    let event = LogEvent::new(LogLevel::Error, "request failed").with_thrown(thrown.clone());
    let options = ProviderOptions::new().with_extract_stacktrace(true);

    let msg = build_message(&event, &options);
    let expected = format!("request failed{}{}", STACKTRACE_SEPARATOR, thrown.render());
    assert_eq!(msg.full_message(), expected);
    assert_eq!(msg.short_message(), expected);
    assert_eq!(msg.level(), 3);
}

#[test]
fn test_idempotent_build_with_fixed_timestamp() {
    let event = LogEvent::new(LogLevel::Warn, "same input")
        .with_timestamp_millis(1_700_000_000_000)
        .with_context_value("user", "alice")
        .push_context("checkout")
        .with_location(SourceLocation::new("src/checkout.rs", 77));
    let options = ProviderOptions::new()
        .with_extended_information(true)
        .with_origin_host("web-1")
        .with_facility("shop");

    assert_eq!(build_message(&event, &options), build_message(&event, &options));
}

#[test]
fn test_build_without_timestamp_resolves_fresh() {
    let event = LogEvent::new(LogLevel::Info, "x").without_timestamp();
    let first = build_message(&event, &ProviderOptions::new());
    let second = build_message(&event, &ProviderOptions::new());

    assert!(first.timestamp_millis() > 0);
    assert!(second.timestamp_millis() >= first.timestamp_millis());
    assert_eq!(first.short_message(), second.short_message());
}

#[test]
fn test_console_appender_end_to_end() {
    let options = ProviderOptions::new()
        .with_origin_host("web-1")
        .with_facility("billing")
        .with_extended_information(true)
        .with_additional_fields_str("{'environment': 'DEV', 'application': 'MyAPP'}")
        .expect("valid additional fields");
    let (appender, buffer, handler) = console_appender(options);

    let event = LogEvent::new(LogLevel::Warn, "invoice overdue")
        .with_timestamp_millis(1_736_332_245_123)
        .with_thread_name("worker-1")
        .with_logger_name("billing.invoices")
        .with_context_value("invoice", "INV-7")
        .push_context("nightly-run")
        .with_location(SourceLocation::new("src/invoices.rs", 120));
    appender.append(&event);

    assert!(handler.is_empty());
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    let json = &lines[0];
    assert_eq!(json["version"], "1.1");
    assert_eq!(json["host"], "web-1");
    assert_eq!(json["facility"], "billing");
    assert_eq!(json["level"], 4);
    assert_eq!(json["short_message"], "invoice overdue");
    assert_eq!(json["line"], "120");
    assert_eq!(json["file"], "src/invoices.rs");
    assert_eq!(json["_environment"], "DEV");
    assert_eq!(json["_application"], "MyAPP");
    assert_eq!(json["_thread"], "worker-1");
    assert_eq!(json["_logger"], "billing.invoices");
    assert_eq!(json["_timestampMs"], "1736332245123");
    assert_eq!(json[format!("_{}", LOGGER_NDC)], "nightly-run");
    assert_eq!(json["_invoice"], "INV-7");
}

#[test]
fn test_origin_host_from_additional_fields() {
    let (appender, buffer, handler) =
        console_appender(ProviderOptions::new().with_additional_field("originHost", "h"));

    appender.append(&LogEvent::new(LogLevel::Info, "hello"));

    assert!(handler.is_empty());
    let json = &buffer.lines()[0];
    assert_eq!(json["host"], "h");
    assert!(json.get("_originHost").is_none());
}

#[test]
fn test_failed_delivery_does_not_stop_stream() {
    // No origin host: every message is invalid
    let buffer = SharedBuffer::default();
    let handler = Arc::new(RecordingErrorHandler::new());
    let appender = GelfAppender::builder("console")
        .sender(ConsoleSender::with_writer(Target::Stderr, buffer.clone()))
        .error_handler(handler.clone())
        .resolve_origin_host(false)
        .build()
        .unwrap();

    for i in 0..3 {
        appender.append(&LogEvent::new(LogLevel::Info, format!("message {}", i)));
    }

    assert!(buffer.lines().is_empty());
    let reports = handler.reports();
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.message == SEND_FAILURE_MESSAGE));
    assert_eq!(appender.metrics().failed_count(), 3);
}

#[test]
fn test_console_close_keeps_stream_open() {
    let (appender, buffer, _) = console_appender(ProviderOptions::new().with_origin_host("web-1"));

    appender.append(&LogEvent::new(LogLevel::Info, "before"));
    appender.close();
    appender.append(&LogEvent::new(LogLevel::Info, "after"));

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["short_message"], "after");
}

#[cfg(feature = "network")]
#[test]
fn test_udp_appender_delivery() {
    let server = UdpSocket::bind("127.0.0.1:0").unwrap();
    server.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let sender = UdpSender::new(server.local_addr().unwrap()).unwrap();

    let appender = GelfAppender::builder("udp")
        .options(ProviderOptions::new().with_origin_host("web-1"))
        .sender(sender)
        .build()
        .unwrap();
    appender.append(&LogEvent::new(LogLevel::Fatal, "out of memory"));

    let mut buf = [0u8; 65_536];
    let len = server.recv(&mut buf).unwrap();
    let mut json = String::new();
    flate2::read::GzDecoder::new(&buf[..len])
        .read_to_string(&mut json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["short_message"], "out of memory");
    assert_eq!(value["level"], 0);
}

#[cfg(feature = "network")]
#[test]
fn test_tcp_appender_from_config() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut frame = Vec::new();
        BufReader::new(stream).read_until(0, &mut frame).unwrap();
        frame.pop();
        String::from_utf8(frame).unwrap()
    });

    let config = AppenderConfig::from_json(&format!(
        r#"{{"name": "graylog", "graylogHost": "tcp:127.0.0.1", "graylogPort": {},
            "originHost": "web-1", "facility": "orders"}}"#,
        port
    ))
    .unwrap();
    let appender = GelfAppender::from_config(&config).unwrap();
    appender.append(&LogEvent::new(LogLevel::Debug, "order placed"));

    let value: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(value["short_message"], "order placed");
    assert_eq!(value["facility"], "orders");
    assert_eq!(value["host"], "web-1");
    assert_eq!(value["level"], 7);
    appender.close();
}

#[cfg(feature = "network")]
#[test]
fn test_tcp_connect_failure_is_config_time_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    assert!(matches!(TcpSender::new(addr), Err(GelfError::Transport { .. })));
}

#[test]
fn test_custom_sender() {
    struct Counting(usize);

    impl GelfSender for Counting {
        fn try_send(&mut self, message: &rust_gelf_appender::GelfMessage) -> rust_gelf_appender::Result<()> {
            message.validate()?;
            self.0 += 1;
            Ok(())
        }

        fn close(&mut self) {}

        fn name(&self) -> &str {
            "counting"
        }
    }

    let mut sender = Counting(0);
    let msg = build_message(
        &LogEvent::new(LogLevel::Info, "x"),
        &ProviderOptions::new().with_origin_host("web-1"),
    );
    assert!(sender.send(&msg));
    assert_eq!(sender.0, 1);
}
