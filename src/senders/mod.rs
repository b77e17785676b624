//! GELF sender implementations
//!
//! A sender delivers one encoded [`GelfMessage`] to a destination. The
//! appender only talks to the [`GelfSender`] capability; which transport sits
//! behind it is decided by [`SenderConfig`] at construction time.

pub mod console;
#[cfg(feature = "network")]
pub mod tcp;
#[cfg(feature = "network")]
pub mod udp;

pub use console::{ConsoleSender, Target};
#[cfg(feature = "network")]
pub use tcp::TcpSender;
#[cfg(feature = "network")]
pub use udp::UdpSender;

use crate::core::{GelfError, GelfMessage, Result};

/// Default GELF input port
pub const DEFAULT_GRAYLOG_PORT: u16 = 12201;

pub trait GelfSender: Send {
    /// Deliver `message`, reporting why delivery failed.
    ///
    /// Invalid messages are rejected before anything is written.
    fn try_send(&mut self, message: &GelfMessage) -> Result<()>;

    /// Deliver `message`; `false` if it was invalid or could not be written.
    fn send(&mut self, message: &GelfMessage) -> bool {
        match self.try_send(message) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(sender = self.name(), error = %err, "GELF message not sent");
                false
            }
        }
    }

    /// Release the transport. Calling it more than once has no further effect.
    fn close(&mut self);

    fn name(&self) -> &str;
}

/// Which transport an appender sends through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenderConfig {
    Console(Target),
    #[cfg(feature = "network")]
    Udp { host: String, port: u16 },
    #[cfg(feature = "network")]
    Tcp { host: String, port: u16 },
}

impl SenderConfig {
    /// Select a network transport from a Graylog host specification.
    ///
    /// `tcp:host` selects TCP, `udp:host` or a bare `host` selects UDP.
    #[cfg(feature = "network")]
    pub fn from_graylog_host(graylog_host: &str, port: u16) -> Result<Self> {
        let (tcp, host) = if let Some(host) = graylog_host.strip_prefix("tcp:") {
            (true, host)
        } else if let Some(host) = graylog_host.strip_prefix("udp:") {
            (false, host)
        } else {
            (false, graylog_host)
        };

        if host.trim().is_empty() {
            return Err(GelfError::config("graylogHost", "No host provided"));
        }
        if port == 0 {
            return Err(GelfError::config("graylogPort", "port must be between 1 and 65535"));
        }

        let host = host.to_string();
        Ok(if tcp {
            SenderConfig::Tcp { host, port }
        } else {
            SenderConfig::Udp { host, port }
        })
    }

    /// Open the configured transport.
    pub fn build(&self) -> Result<Box<dyn GelfSender>> {
        match self {
            SenderConfig::Console(target) => Ok(Box::new(ConsoleSender::new(*target))),
            #[cfg(feature = "network")]
            SenderConfig::Udp { host, port } => {
                Ok(Box::new(UdpSender::new(format!("{}:{}", host, port))?))
            }
            #[cfg(feature = "network")]
            SenderConfig::Tcp { host, port } => {
                Ok(Box::new(TcpSender::new(format!("{}:{}", host, port))?))
            }
        }
    }
}

#[cfg(all(test, feature = "network"))]
mod tests {
    use super::*;

    #[test]
    fn test_graylog_host_prefixes() {
        assert_eq!(
            SenderConfig::from_graylog_host("tcp:graylog.local", 12201).unwrap(),
            SenderConfig::Tcp {
                host: "graylog.local".to_string(),
                port: 12201
            }
        );
        assert_eq!(
            SenderConfig::from_graylog_host("udp:graylog.local", 12202).unwrap(),
            SenderConfig::Udp {
                host: "graylog.local".to_string(),
                port: 12202
            }
        );
        assert_eq!(
            SenderConfig::from_graylog_host("graylog.local", 12201).unwrap(),
            SenderConfig::Udp {
                host: "graylog.local".to_string(),
                port: 12201
            }
        );
    }

    #[test]
    fn test_graylog_host_errors() {
        assert!(matches!(
            SenderConfig::from_graylog_host("tcp:", 12201),
            Err(GelfError::InvalidConfiguration { .. })
        ));
        assert!(SenderConfig::from_graylog_host("graylog.local", 0).is_err());
    }

    #[test]
    fn test_build_udp_sender() {
        let config = SenderConfig::from_graylog_host("udp:127.0.0.1", 12201).unwrap();
        let sender = config.build().unwrap();
        assert_eq!(sender.name(), "udp");
    }
}
