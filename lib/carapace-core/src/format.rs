//! Body-format capability.
//!
//! [`BodyFormat`] is the pluggable contract for one content type: encode
//! typed payloads into wire bodies, decode response bodies into typed
//! results, and classify error payloads. The JSON implementation lives in
//! the `carapace` crate; the contract generalizes to any format.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{RequestBody, Response, Result};

/// Request payload handed to [`BodyFormat::encode`].
///
/// Either a typed value the format should encode, or a prebuilt wire body
/// that must pass through unchanged (no double-encoding, content type
/// untouched).
#[derive(Debug)]
pub enum Payload<'a, D = ()> {
    /// A typed value to encode with the format's rules.
    Value(&'a D),
    /// A prebuilt body, sent as-is.
    Raw(RequestBody),
}

impl<'a, D> From<&'a D> for Payload<'a, D> {
    fn from(value: &'a D) -> Self {
        Self::Value(value)
    }
}

impl<'a, D> From<RequestBody> for Payload<'a, D> {
    fn from(body: RequestBody) -> Self {
        Self::Raw(body)
    }
}

/// Best-effort parsed representation of an error response body.
///
/// Extraction never fails: a body that does not conform to the declared
/// error shape degrades to its raw text, and a missing body is `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetails<E> {
    /// The body decoded as the declared error shape.
    Parsed(E),
    /// The body did not decode; its raw text is preserved.
    Text(String),
    /// The response carried no body.
    Absent,
}

impl<E> ErrorDetails<E> {
    /// Returns `true` if the response carried no body.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the decoded error object, if the body conformed.
    #[must_use]
    pub const fn as_parsed(&self) -> Option<&E> {
        match self {
            Self::Parsed(parsed) => Some(parsed),
            _ => None,
        }
    }

    /// Returns the raw body text, if the body did not conform.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Capability interface for one body format: serialize, deserialize,
/// classify error payloads.
///
/// An API client delegates all body handling to an implementation of this
/// trait; implementing it for a new content type is the whole work of
/// supporting that format.
pub trait BodyFormat: Send + Sync {
    /// Declared shape of remote error bodies.
    type ErrorBody: std::fmt::Debug + Send + Sync + 'static;

    /// Decode a response body into a typed model.
    ///
    /// A successful response with a non-empty body decodes as `T`. An empty
    /// body, or a response that reached this hook despite a non-success
    /// status (because the client's policy let it pass), yields
    /// `T::default()` - so `Vec<X>` decodes to the empty vector and
    /// `Option<X>` to `None`, never an absent value a caller could trip on.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-empty body fails to decode as `T`.
    fn decode<T>(&self, response: &Response) -> Result<T>
    where
        T: DeserializeOwned + Default;

    /// Encode a payload into a wire body.
    ///
    /// A [`Payload::Raw`] is returned unchanged; a [`Payload::Value`] is
    /// encoded with the format's rules and stamped with the format's content
    /// type.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn encode<D>(&self, payload: Payload<'_, D>) -> Result<RequestBody>
    where
        D: Serialize;

    /// Extract structured details from an error response body.
    ///
    /// Infallible by contract: the result is always one of
    /// {typed object, raw text, absent}. No decode failure escapes.
    fn extract_error_details(&self, response: &Response) -> ErrorDetails<Self::ErrorBody>;
}
