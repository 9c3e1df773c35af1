//! Bundled HTTP transport over hyper-util.
//!
//! [`HyperTransport`] implements [`HttpClient`] with connection pooling,
//! rustls TLS, a per-request timeout, and structured `tracing` output. An
//! [`ApiClient`](crate::ApiClient) does not require this transport - any
//! [`HttpClient`] works - but it is the one most callers want.

use std::collections::HashMap;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::{Instrument, Level, info, span, warn};

use carapace_core::{Error, HttpClient, Request, Response, Result};

use crate::config::TransportConfig;

/// HTTP transport using hyper-util with connection pooling and rustls TLS.
///
/// # Example
///
/// ```ignore
/// use carapace::{HyperTransport, TransportConfig};
/// use std::time::Duration;
///
/// let transport = HyperTransport::with_config(
///     TransportConfig::builder()
///         .timeout(Duration::from_secs(10))
///         .build(),
/// );
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration.
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector());

        Self { inner, config }
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    async fn exchange(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let hyper_request = build_hyper_request(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(map_hyper_error)?;

        let status = response.status().as_u16();
        let response_headers = extract_headers(response.headers());

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, response_headers, body))
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for HyperTransport {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let method = request.method();
        let url = request.url().to_string();
        let span = span!(Level::INFO, "http_request", %method, %url);

        async move {
            let start = Instant::now();
            let result = self.exchange(request).await;

            // Saturating conversion to u64 (truncates after ~584 million years)
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) => {
                    let status = response.status();
                    if response.is_success() {
                        info!(status, elapsed_ms, "request completed");
                    } else {
                        warn!(status, elapsed_ms, "request completed with error status");
                    }
                }
                Err(err) => {
                    warn!(error = %err, elapsed_ms, "request failed");
                }
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Create an HTTPS connector with rustls.
///
/// Supports both HTTP/1.1 and HTTP/2, with TLS enabled using the Mozilla
/// root certificates.
fn https_connector() -> HttpsConnector<HttpConnector> {
    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .build()
}

/// Build a hyper request from a carapace request.
fn build_hyper_request(request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
    let (method, url, headers, body) = request.into_parts();

    let mut builder = http::Request::builder()
        .method(http::Method::from(method))
        .uri(url.as_str());

    for (name, value) in &headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let body = body.map_or_else(Full::default, Full::new);
    builder
        .body(body)
        .map_err(|e| Error::invalid_request(e.to_string()))
}

/// Extract response headers as a `HashMap`.
fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.to_string(), v.to_string()))
        })
        .collect()
}

#[allow(clippy::needless_pass_by_value)]
fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
    let msg = err.to_string();

    if err.is_connect() {
        return Error::connection(msg);
    }

    if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
        return Error::tls(msg);
    }

    Error::connection(msg)
}
