//! Error types for the GELF appender

pub type Result<T> = std::result::Result<T, GelfError>;

#[derive(Debug, thiserror::Error)]
pub enum GelfError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Message rejected by the GELF validity check
    #[error("Invalid GELF message: {reason}")]
    InvalidMessage { reason: String },

    /// Transport failure with the remote address
    #[error("Transport error ({transport} {address}): {message}")]
    Transport {
        transport: String,
        address: String,
        message: String,
    },

    /// Encoded message needs more chunks than GELF allows
    #[error("GELF message too large: {chunks} chunks needed, at most {max} allowed")]
    MessageTooLarge { chunks: usize, max: usize },

    /// Local hostname lookup failed
    #[error("Unknown local hostname: {0}")]
    HostnameResolution(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl GelfError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        GelfError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        GelfError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid message error
    pub fn invalid_message(reason: impl Into<String>) -> Self {
        GelfError::InvalidMessage {
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn transport(
        transport: impl Into<String>,
        address: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        GelfError::Transport {
            transport: transport.into(),
            address: address.into(),
            message: message.into(),
        }
    }

    /// Create a message too large error
    pub fn message_too_large(chunks: usize, max: usize) -> Self {
        GelfError::MessageTooLarge { chunks, max }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        GelfError::Other(msg.into())
    }
}
