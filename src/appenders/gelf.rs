//! GELF appender
//!
//! Turns each log event into a GELF message and hands it to the configured
//! sender. Failed deliveries are reported, counted, and otherwise ignored so
//! the event stream keeps flowing.

use crate::core::{
    build_message, Appender, AppenderMetrics, ErrorHandler, GelfError, LogEvent, ProviderOptions,
    Result, TracingErrorHandler,
};
use crate::senders::{GelfSender, SenderConfig, Target, DEFAULT_GRAYLOG_PORT};
use parking_lot::Mutex;
use serde::Deserialize;
use std::sync::Arc;

/// Reported once per event whose message could not be delivered
pub const SEND_FAILURE_MESSAGE: &str = "Could not send GELF message";

pub struct GelfAppender {
    name: String,
    options: ProviderOptions,
    sender: Mutex<Option<Box<dyn GelfSender>>>,
    error_handler: Arc<dyn ErrorHandler>,
    metrics: Arc<AppenderMetrics>,
}

impl GelfAppender {
    /// Create a builder for GelfAppender
    ///
    /// # Example
    /// ```
    /// use rust_gelf_appender::prelude::*;
    ///
    /// let appender = GelfAppender::builder("gelf")
    ///     .options(ProviderOptions::new().with_origin_host("web-1").with_facility("billing"))
    ///     .sender(ConsoleSender::new(Target::Stdout))
    ///     .build()
    ///     .unwrap();
    ///
    /// appender.append(&LogEvent::new(LogLevel::Info, "hello"));
    /// assert_eq!(appender.metrics().sent_count(), 1);
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> GelfAppenderBuilder {
        GelfAppenderBuilder::new(name)
    }

    /// Build an appender from deserialized configuration.
    pub fn from_config(config: &AppenderConfig) -> Result<Self> {
        let name = config
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| GelfError::config("GelfAppender", "No name provided for GelfAppender"))?;

        GelfAppenderBuilder::new(name)
            .options(config.options.clone())
            .sender_config(config.sender_config()?)
            .build()
    }

    pub fn options(&self) -> &ProviderOptions {
        &self.options
    }

    pub fn metrics(&self) -> Arc<AppenderMetrics> {
        Arc::clone(&self.metrics)
    }

    fn dispatch(&self, event: &LogEvent) -> Result<()> {
        let message = build_message(event, &self.options);
        let mut sender = self.sender.lock();
        match sender.as_mut() {
            Some(sender) => sender.try_send(&message),
            None => Err(GelfError::other("no GELF sender configured")),
        }
    }
}

impl Appender for GelfAppender {
    fn append(&self, event: &LogEvent) {
        match self.dispatch(event) {
            Ok(()) => {
                self.metrics.record_sent();
            }
            Err(err) => {
                self.metrics.record_failed();
                self.error_handler
                    .error(&self.name, SEND_FAILURE_MESSAGE, Some(&err));
            }
        }
    }

    fn close(&self) {
        if let Some(sender) = self.sender.lock().as_mut() {
            sender.close();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub struct GelfAppenderBuilder {
    name: String,
    options: ProviderOptions,
    sender: Option<Box<dyn GelfSender>>,
    sender_config: Option<SenderConfig>,
    error_handler: Arc<dyn ErrorHandler>,
    resolve_origin_host: bool,
}

impl GelfAppenderBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ProviderOptions::default(),
            sender: None,
            sender_config: None,
            error_handler: Arc::new(TracingErrorHandler),
            resolve_origin_host: true,
        }
    }

    /// Set the message provider options
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: ProviderOptions) -> Self {
        self.options = options;
        self
    }

    /// Send through an already constructed sender
    #[must_use = "builder methods return a new value"]
    pub fn sender<S: GelfSender + 'static>(mut self, sender: S) -> Self {
        self.sender = Some(Box::new(sender));
        self
    }

    /// Open a sender from `config` when the appender is built
    ///
    /// Ignored when [`sender`](Self::sender) is also set.
    #[must_use = "builder methods return a new value"]
    pub fn sender_config(mut self, config: SenderConfig) -> Self {
        self.sender_config = Some(config);
        self
    }

    /// Set where delivery failures are reported
    ///
    /// Default is [`TracingErrorHandler`].
    #[must_use = "builder methods return a new value"]
    pub fn error_handler(mut self, handler: Arc<dyn ErrorHandler>) -> Self {
        self.error_handler = handler;
        self
    }

    /// Look up the local hostname when no origin host is configured
    ///
    /// Default is `true`.
    #[must_use = "builder methods return a new value"]
    pub fn resolve_origin_host(mut self, enable: bool) -> Self {
        self.resolve_origin_host = enable;
        self
    }

    /// Build the appender
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty or the configured sender cannot be
    /// opened.
    pub fn build(self) -> Result<GelfAppender> {
        if self.name.trim().is_empty() {
            return Err(GelfError::config("GelfAppender", "No name provided for GelfAppender"));
        }

        let sender = match (self.sender, &self.sender_config) {
            (Some(sender), _) => Some(sender),
            (None, Some(config)) => Some(config.build()?),
            (None, None) => None,
        };

        let options = if self.resolve_origin_host {
            let (options, err) = self.options.resolve_origin_host();
            if let Some(err) = err {
                self.error_handler
                    .error(&self.name, "Unknown local hostname", Some(&err));
            }
            options
        } else {
            self.options
        };

        tracing::debug!(
            appender = %self.name,
            sender = sender.as_ref().map_or("none", |s| s.name()),
            "GELF appender created"
        );

        Ok(GelfAppender {
            name: self.name,
            options,
            sender: Mutex::new(sender),
            error_handler: self.error_handler,
            metrics: Arc::new(AppenderMetrics::new()),
        })
    }
}

/// Appender settings as they appear in configuration files
///
/// ```
/// use rust_gelf_appender::appenders::AppenderConfig;
///
/// let config = AppenderConfig::from_json(r#"{
///     "name": "graylog",
///     "graylogHost": "tcp:graylog.local",
///     "graylogPort": 12201,
///     "facility": "billing",
///     "addExtendedInformation": true,
///     "additionalFields": "{'environment': 'DEV'}"
/// }"#).unwrap();
///
/// assert_eq!(config.options.facility.as_deref(), Some("billing"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppenderConfig {
    pub name: Option<String>,
    /// Console stream, used when no Graylog host is configured
    pub target: Option<Target>,
    /// `tcp:host`, `udp:host` or a bare host (UDP)
    pub graylog_host: Option<String>,
    pub graylog_port: Option<u16>,
    #[serde(flatten)]
    pub options: ProviderOptions,
}

impl AppenderConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| GelfError::config("GelfAppender", e.to_string()))
    }

    /// Transport selected by this configuration
    ///
    /// A Graylog host wins over a console target; with neither, messages go
    /// to standard output.
    pub fn sender_config(&self) -> Result<SenderConfig> {
        match &self.graylog_host {
            #[cfg(feature = "network")]
            Some(host) => {
                SenderConfig::from_graylog_host(host, self.graylog_port.unwrap_or(DEFAULT_GRAYLOG_PORT))
            }
            #[cfg(not(feature = "network"))]
            Some(_) => Err(GelfError::config(
                "graylogHost",
                "network senders are not enabled in this build",
            )),
            None => Ok(SenderConfig::Console(self.target.unwrap_or_default())),
        }
    }
}
