//! Error types for carapace.
//!
//! Two layers mirror the two places a call can fail:
//!
//! - [`Error`] - transport-level failures and body codec failures, produced
//!   by [`HttpClient`](crate::HttpClient) implementations and body helpers.
//! - [`ApiError`] - the per-call error surfaced by an API client: either the
//!   exchange never completed, or a response arrived with a status the
//!   client's policy classifies as an error.

use std::fmt;

use derive_more::{Display, Error, From};
use url::Url;

use crate::format::ErrorDetails;

/// Transport and codec error type.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if this is a body (de)serialization error.
    #[must_use]
    pub const fn is_codec(&self) -> bool {
        matches!(
            self,
            Self::JsonSerialization(_) | Self::JsonDeserialization { .. }
        )
    }
}

// ============================================================================
// Per-Call API Error
// ============================================================================

/// Error surfaced by a typed API call.
///
/// `E` is the caller-declared shape of remote error bodies; the decoded
/// details ride along on the [`Status`](ApiError::Status) variant.
///
/// Exactly one of {typed result, `Transport`, `Status`, `Codec`} is produced
/// per call.
#[derive(Debug, Display)]
pub enum ApiError<E> {
    /// The exchange could not complete; wraps the transport-level cause.
    #[display("sending request failed: {_0}")]
    Transport(Error),

    /// A response arrived and its status is classified as an error.
    #[display("API call failed. (HTTP{status}: {uri})")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Resolved URI of the request.
        uri: Url,
        /// Best-effort parsed error details.
        details: ErrorDetails<E>,
    },

    /// Request body encoding or success body decoding failed.
    #[display("body codec failed: {_0}")]
    Codec(Error),
}

impl<E: fmt::Debug> std::error::Error for ApiError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(source) | Self::Codec(source) => Some(source),
            Self::Status { .. } => None,
        }
    }
}

impl<E> ApiError<E> {
    /// Returns the HTTP status code if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the parsed error details if a response was received.
    #[must_use]
    pub const fn details(&self) -> Option<&ErrorDetails<E>> {
        match self {
            Self::Status { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Consume the error, returning the error details if any.
    #[must_use]
    pub fn into_details(self) -> Option<ErrorDetails<E>> {
        match self {
            Self::Status { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Returns `true` if the exchange never completed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if a response was received with an error status.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
