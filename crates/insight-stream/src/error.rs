//! Error types for calls to the analysis services.

use thiserror::Error;

/// Errors that can occur while talking to a remote service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The request or stream exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The service could not be reached.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The service answered with a non-success status.
    #[error("server returned {status}{}", format_detail(.detail))]
    Server {
        status: u16,
        /// Detail message from the response body, if any.
        detail: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The configured endpoint is not a valid base URL.
    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    /// Any other request failure.
    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Returns a user-friendly error message suitable for display.
    ///
    /// Timeouts, connectivity failures, and server-reported details each get
    /// distinct wording.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout(_) => "The analysis service took too long to respond.".to_string(),
            Self::Connect(_) => {
                "Could not reach the analysis service. Check that it is running and the endpoint is correct."
                    .to_string()
            }
            Self::Server {
                detail: Some(detail),
                ..
            } => format!("The analysis service reported an error: {detail}"),
            Self::Server { status, .. } => {
                format!("The analysis service failed with status {status}.")
            }
            Self::InvalidEndpoint(endpoint) => format!("'{endpoint}' is not a valid service URL."),
            Self::Decode(_) | Self::Request(_) => "An unexpected error occurred.".to_string(),
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    ///
    /// Nothing retries automatically; this only informs the message shown.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connect(_) => true,
            Self::Server { status, .. } => *status >= 500,
            Self::Decode(_) | Self::InvalidEndpoint(_) | Self::Request(_) => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Server {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                Self::Timeout(err.to_string())
            }
            std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::ConnectionAborted => {
                Self::Connect(err.to_string())
            }
            _ => Self::Request(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

fn format_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_distinguish_failures() {
        let timeout = TransportError::Timeout("deadline".to_string());
        assert!(timeout.user_message().contains("too long"));

        let connect = TransportError::Connect("refused".to_string());
        assert!(connect.user_message().contains("Could not reach"));

        let server = TransportError::Server {
            status: 400,
            detail: Some("Invalid file format".to_string()),
        };
        assert!(server.user_message().ends_with("Invalid file format"));
        assert_eq!(server.to_string(), "server returned 400: Invalid file format");
    }

    #[test]
    fn retryable_classification() {
        assert!(TransportError::Timeout(String::new()).is_retryable());
        assert!(TransportError::Server { status: 503, detail: None }.is_retryable());
        assert!(!TransportError::Server { status: 404, detail: None }.is_retryable());
        assert!(!TransportError::Decode(String::new()).is_retryable());
    }

    #[test]
    fn io_timeouts_map_to_timeout() {
        let err = TransportError::from(std::io::Error::from(std::io::ErrorKind::TimedOut));
        assert!(matches!(err, TransportError::Timeout(_)));
    }
}
