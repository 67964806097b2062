//! Error handling for the SMC exporter crate.

/// A specialized `Result` type for SMC exporter operations.
pub type Result<T> = std::result::Result<T, SmcError>;

/// The main error type for SMC exporter operations.
#[derive(Debug, thiserror::Error)]
pub enum SmcError {
    /// The hardware session could not be opened
    #[error("Failed to open SMC session: {0}")]
    Connection(String),

    /// A single sensor key could not be read from the controller
    #[error("Failed to read SMC key {key}: {reason}")]
    KeyRead { key: String, reason: String },

    /// A raw value could not be interpreted
    #[error("Failed to decode SMC value: {0}")]
    Decode(#[from] DecodeError),

    /// The gating fan-count read failed
    #[error("Fan count unavailable: {0}")]
    FanCountUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// Metric registration or exposition failed
    #[error("Metrics exposition error: {0}")]
    Exposition(#[from] prometheus::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to turn a raw typed payload into a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The type tag has no decode rule
    #[error("unsupported data type '{tag}'")]
    UnsupportedType { tag: String },

    /// The payload is shorter than the type requires
    #[error("truncated '{tag}' payload: expected {expected} bytes, got {actual}")]
    Truncated {
        tag: String,
        expected: usize,
        actual: usize,
    },
}

impl SmcError {
    /// Create a new connection error
    pub fn connection_error(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a new key read error
    pub fn key_read_error(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::KeyRead {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new fan count error
    pub fn fan_count_error(msg: impl Into<String>) -> Self {
        Self::FanCountUnavailable(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Whether this error should stop the process rather than a single key.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_errors_are_fatal() {
        assert!(SmcError::connection_error("no AppleSMC").is_fatal());
        assert!(!SmcError::key_read_error("F0Ac", "not found").is_fatal());
        assert!(!SmcError::fan_count_error("FNum missing").is_fatal());
        assert!(!SmcError::from(DecodeError::UnsupportedType {
            tag: "sp78".into()
        })
        .is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = SmcError::key_read_error("TC0P", "key not found");
        assert_eq!(err.to_string(), "Failed to read SMC key TC0P: key not found");

        let err = DecodeError::Truncated {
            tag: "flt ".into(),
            expected: 4,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "truncated 'flt ' payload: expected 4 bytes, got 2"
        );
    }
}
