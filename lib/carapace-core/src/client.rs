//! HTTP transport trait.
//!
//! [`HttpClient`] is the collaborator contract an API client dispatches
//! through. The crate `carapace` bundles a hyper-based implementation;
//! implement the trait yourself to plug in another engine or a test stub.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP transport trait.
///
/// Implementations execute one buffered exchange per call. They own
/// connection pooling, TLS, and timeouts; the API client layered on top owns
/// none of that and issues exactly one request per call.
///
/// # Example
///
/// A canned stub for tests:
///
/// ```
/// use bytes::Bytes;
/// use carapace_core::{HttpClient, Request, Response, Result};
/// use std::collections::HashMap;
///
/// #[derive(Clone)]
/// struct Canned(u16, &'static str);
///
/// impl HttpClient for Canned {
///     async fn execute(&self, _request: Request<Bytes>) -> Result<Response<Bytes>> {
///         Ok(Response::new(self.0, HashMap::new(), Bytes::from(self.1)))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error only when the exchange itself fails:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    ///
    /// A response with an error status is NOT an error at this level; status
    /// classification belongs to the API client's policy.
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}
