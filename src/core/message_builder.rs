//! Log event to GELF message translation
//!
//! [`build_message`] is total: every structurally valid event yields a
//! message, and the same event and options always produce the same message.

use super::config::{ProviderOptions, ORIGIN_HOST_KEY};
use super::gelf_message::GelfMessage;
use super::log_event::LogEvent;
use super::severity::syslog_equivalent;
use super::timestamp::resolve_timestamp;

/// Longest short message GELF receivers are sent, in characters
pub const MAX_SHORT_MESSAGE_LENGTH: usize = 250;
/// Separator between the rendered message and an appended stack trace
pub const STACKTRACE_SEPARATOR: &str = "\n\r";

pub const THREAD_NAME: &str = "thread";
pub const LOGGER_NAME: &str = "logger";
pub const LOGGER_NDC: &str = "loggerNdc";
pub const TIMESTAMP_MILLIS: &str = "timestampMs";

/// Build the GELF message for `event`.
pub fn build_message(event: &LogEvent, options: &ProviderOptions) -> GelfMessage {
    let timestamp = resolve_timestamp(event);
    let level = syslog_equivalent(event.level);

    let (file, line) = match (&event.location, options.include_location) {
        (Some(location), true) => (Some(location.file.clone()), Some(location.line.to_string())),
        _ => (None, None),
    };

    let mut full_message = event.rendered_message().to_string();
    if options.extract_stacktrace {
        if let Some(thrown) = &event.thrown {
            full_message.push_str(STACKTRACE_SEPARATOR);
            full_message.push_str(&thrown.render());
        }
    }

    let short_message = truncate_short_message(&full_message);
    let mut message = GelfMessage::new(short_message, full_message, timestamp, level, line, file);

    if let Some(host) = options.origin_host.as_deref().filter(|h| !h.is_empty()) {
        message.set_host(host);
    }
    if let Some(facility) = options.facility.as_deref().filter(|f| !f.is_empty()) {
        message.set_facility(facility);
    }

    for (key, value) in &options.additional_fields {
        if key == ORIGIN_HOST_KEY && message.host().is_none() {
            message.set_host(value.as_str());
        } else {
            message.add_field(key.as_str(), value.as_str());
        }
    }

    // Extended fields go last so they win over additional fields.
    if options.add_extended_information {
        message.add_field(THREAD_NAME, event.thread_name.as_str());
        message.add_field(LOGGER_NAME, event.logger_name.as_str());
        message.add_field(TIMESTAMP_MILLIS, timestamp.to_string());
        if let Some(ndc) = event.context_peek() {
            message.add_field(LOGGER_NDC, ndc);
        }
        for (key, value) in &event.context_map {
            message.add_field(key.as_str(), value.as_str());
        }
    }

    message
}

/// Text longer than [`MAX_SHORT_MESSAGE_LENGTH`] characters is cut to its
/// first `MAX_SHORT_MESSAGE_LENGTH - 1` characters.
pub fn truncate_short_message(text: &str) -> String {
    match text.char_indices().nth(MAX_SHORT_MESSAGE_LENGTH) {
        None => text.to_string(),
        Some(_) => text.chars().take(MAX_SHORT_MESSAGE_LENGTH - 1).collect(),
    }
}
