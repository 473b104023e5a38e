//! Error types for the CaseStack client.
//!
//! # Design
//! Argument and credential problems are caught before anything touches the
//! network and surface as `ConfigurationError`. Every failed exchange, whether
//! the transport gave up or the server answered with a rejected status, lands
//! in `HttpError` carrying the numeric status so callers can tell a 404 from a
//! 500. Nothing here is retried.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by `CaseStackApi` and entity `save` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument or credential was missing or empty.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// The transport failed or the server answered with a rejected status.
    ///
    /// `status` is 0 when the transport failed before any response arrived.
    #[error("{message} (HTTP {status})")]
    HttpError {
        status: u16,
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a transport failure, keeping whatever status it saw.
    pub fn transport(message: impl Into<String>, source: TransportError) -> Self {
        Self::HttpError {
            status: source.status.unwrap_or(0),
            message: message.into(),
            source: Some(source),
        }
    }

    /// HTTP status carried by an `HttpError`.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::HttpError { status, .. } if (400..500).contains(status))
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::HttpError { status, .. } if *status >= 500)
    }
}
