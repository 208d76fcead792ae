use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::cache::CacheError;
use crate::config::error::ConfigError;

/// Crate-wide error type returned by the translation client.
///
/// Transport, timeout, server and protocol failures all surface here and are
/// never retried internally. Cache failures met while translating are logged
/// and treated as misses, so `Cache` only appears when a cache is built.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Could not open a connection to the translation server
    #[error("Failed to connect to translation server at {address}")]
    Connection {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Socket failure on an established connection
    #[error("Transport error: {0}")]
    Io(#[from] io::Error),

    /// No answer within the configured request timeout
    #[error("Translation request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with an error response
    #[error("Translation server error: {0}")]
    Server(String),

    /// The server answered with something that could not be parsed
    #[error("Malformed response: {0}")]
    Protocol(String),

    /// The caller passed arguments the client cannot translate
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The client was closed with `close()`
    #[error("Client is closed")]
    Closed,

    /// Cache backend could not be created
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Settings could not be loaded or are invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        ClientError::InvalidInput(message.into())
    }

    pub fn protocol<S: Into<String>>(message: S) -> Self {
        ClientError::Protocol(message.into())
    }

    /// Whether the underlying connection should be discarded after this error.
    pub fn is_connection_fatal(&self) -> bool {
        matches!(
            self,
            ClientError::Connection { .. } | ClientError::Io(_) | ClientError::Protocol(_)
        )
    }
}

/// Type alias for Result with ClientError to simplify function signatures
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_keeps_source() {
        let err = ClientError::Connection {
            address: "127.0.0.1:5555".to_string(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert!(err.to_string().contains("127.0.0.1:5555"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_fatal_classification() {
        assert!(ClientError::protocol("bad frame").is_connection_fatal());
        assert!(ClientError::Io(io::Error::other("reset")).is_connection_fatal());
        assert!(!ClientError::Timeout(Duration::from_secs(3)).is_connection_fatal());
        assert!(!ClientError::Server("boom".into()).is_connection_fatal());
        assert!(!ClientError::Closed.is_connection_fatal());
    }
}
