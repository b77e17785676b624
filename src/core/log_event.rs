//! Log event structure
//!
//! [`LogEvent`] is the host framework's view of a single log call. It is
//! consumed read-only by the message builder.

use super::log_level::LogLevel;
use super::thrown::ThrownError;
use super::timestamp::EventTime;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;

thread_local! {
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Name of the calling thread, or its id when unnamed. Cached per thread.
fn current_thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let thread = std::thread::current();
                match thread.name() {
                    Some(name) => name.to_string(),
                    None => format!("{:?}", thread.id()),
                }
            })
            .clone()
    })
}

/// Call-site of a log statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_path: Option<String>,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            module_path: None,
        }
    }

    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub level: LogLevel,
    /// Rendered message text; `None` when the host could not render one.
    pub message: Option<String>,
    /// Occurrence time in milliseconds since the epoch, if recorded.
    pub timestamp_millis: Option<i64>,
    pub thrown: Option<ThrownError>,
    pub thread_name: String,
    pub logger_name: String,
    /// Mapped diagnostic context
    pub context_map: BTreeMap<String, String>,
    /// Nested diagnostic context; the last element is the top of the stack.
    pub context_stack: Vec<String>,
    pub location: Option<SourceLocation>,
}

impl LogEvent {
    /// Create an event on the calling thread, stamped with the current time.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: Some(message.into()),
            timestamp_millis: Some(super::timestamp::now_millis()),
            thrown: None,
            thread_name: current_thread_name(),
            logger_name: String::new(),
            context_map: BTreeMap::new(),
            context_stack: Vec::new(),
            location: None,
        }
    }

    pub fn with_timestamp_millis(mut self, millis: i64) -> Self {
        self.timestamp_millis = Some(millis);
        self
    }

    /// Drop the recorded time so it is resolved when the message is built.
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp_millis = None;
        self
    }

    pub fn with_thrown(mut self, thrown: ThrownError) -> Self {
        self.thrown = Some(thrown);
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    pub fn with_logger_name(mut self, logger_name: impl Into<String>) -> Self {
        self.logger_name = logger_name.into();
        self
    }

    pub fn with_context_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context_map.insert(key.into(), value.into());
        self
    }

    pub fn push_context(mut self, label: impl Into<String>) -> Self {
        self.context_stack.push(label.into());
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Top of the nested diagnostic context, if any.
    pub fn context_peek(&self) -> Option<&str> {
        self.context_stack.last().map(String::as_str)
    }

    /// Rendered message, empty when absent.
    pub fn rendered_message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

impl EventTime for LogEvent {
    fn occurred_at_millis(&self) -> Option<i64> {
        self.timestamp_millis
    }
}
