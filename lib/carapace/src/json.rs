//! JSON body format.
//!
//! [`JsonFormat`] implements the [`BodyFormat`] contract for
//! `application/json` bodies. `E` is the declared shape of remote error
//! bodies; it defaults to [`serde_json::Value`] for APIs without a fixed
//! error envelope.
//!
//! Field-name casing is decided by serde at compile time - annotate model
//! types with `#[serde(rename_all = "camelCase")]` (or whatever the remote
//! API speaks); the format value itself carries no runtime serializer state
//! and is freely shared across concurrent calls.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use carapace_core::{
    BodyFormat, ErrorDetails, Payload, RequestBody, Response, Result, from_json, to_json,
};

use crate::ApiClient;

/// An [`ApiClient`] speaking JSON.
pub type JsonApiClient<C, E = serde_json::Value> = ApiClient<C, JsonFormat<E>>;

impl<C, E> ApiClient<C, JsonFormat<E>> {
    /// Create a JSON API client over the given transport and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn json(transport: C, base_url: impl AsRef<str>) -> Result<Self> {
        Self::new(transport, base_url, JsonFormat::new())
    }
}

/// JSON implementation of [`BodyFormat`].
pub struct JsonFormat<E = serde_json::Value> {
    _error_body: PhantomData<fn() -> E>,
}

impl<E> JsonFormat<E> {
    /// Create a JSON format declaring `E` as the error body shape.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _error_body: PhantomData,
        }
    }
}

impl<E> fmt::Debug for JsonFormat<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFormat").finish()
    }
}

impl<E> Clone for JsonFormat<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for JsonFormat<E> {}

impl<E> Default for JsonFormat<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> BodyFormat for JsonFormat<E>
where
    E: DeserializeOwned + fmt::Debug + Send + Sync + 'static,
{
    type ErrorBody = E;

    fn decode<T>(&self, response: &Response) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let body = response.body();
        if response.is_success() && !body.is_empty() {
            from_json(body)
        } else {
            Ok(T::default())
        }
    }

    fn encode<D>(&self, payload: Payload<'_, D>) -> Result<RequestBody>
    where
        D: Serialize,
    {
        match payload {
            // Prebuilt bodies pass through untouched.
            Payload::Raw(body) => Ok(body),
            Payload::Value(data) => Ok(RequestBody::json(to_json(data)?)),
        }
    }

    fn extract_error_details(&self, response: &Response) -> ErrorDetails<E> {
        let body = response.body();
        if body.is_empty() {
            return ErrorDetails::Absent;
        }
        match from_json::<E>(body) {
            Ok(parsed) => ErrorDetails::Parsed(parsed),
            // Servers routinely answer 5xx with plain text or HTML; keep the
            // raw text instead of failing while already handling a failure.
            Err(_) => ErrorDetails::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }
}
