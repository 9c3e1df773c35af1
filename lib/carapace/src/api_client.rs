//! Generic typed API client.
//!
//! [`ApiClient`] owns the verb dispatch: normalize the path, execute through
//! the transport, branch on the status classification, and delegate all body
//! handling to the injected [`BodyFormat`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use carapace_core::{
    ApiError, BodyFormat, ErrorOnNonSuccess, HttpClient, Method, Payload, Request, RequestBody,
    Response, Result, StatusPolicy,
};

/// Result of one API call through a client using format `F`.
pub type ApiResult<T, F> = std::result::Result<T, ApiError<<F as BodyFormat>::ErrorBody>>;

/// Generic typed API client.
///
/// Combines a transport, a base URL, a body format, and a status policy.
/// Each verb call is an independent unit of work: no per-call state lives on
/// the client, so one instance serves concurrent calls freely. The client
/// borrows the transport logically - it never manages connection lifecycle,
/// and cloning the client clones the handle, not the pool behind it.
///
/// Exactly one of {typed result, transport error, status error, codec error}
/// is produced per call.
///
/// # Example
///
/// ```ignore
/// use carapace::{ApiClient, HyperTransport, JsonApiClient};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct User {
///     id: u64,
///     display_name: String,
/// }
///
/// let client: JsonApiClient<HyperTransport> =
///     ApiClient::json(HyperTransport::new(), "https://api.example.com")?;
/// let user: User = client.get("/users/42").await?;
/// ```
#[derive(Debug)]
pub struct ApiClient<C, F, P = ErrorOnNonSuccess> {
    transport: C,
    base_url: Url,
    format: F,
    policy: P,
}

impl<C: Clone, F: Clone, P: Clone> Clone for ApiClient<C, F, P> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            base_url: self.base_url.clone(),
            format: self.format.clone(),
            policy: self.policy.clone(),
        }
    }
}

impl<C, F> ApiClient<C, F> {
    /// Create a client with the given transport, base URL, and format.
    ///
    /// The default status policy raises on every non-2xx response.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn new(transport: C, base_url: impl AsRef<str>, format: F) -> Result<Self> {
        Ok(Self {
            transport,
            base_url: Url::parse(base_url.as_ref())?,
            format,
            policy: ErrorOnNonSuccess,
        })
    }

    /// Create a client with a pre-parsed base URL.
    #[must_use]
    pub fn with_url(transport: C, base_url: Url, format: F) -> Self {
        Self {
            transport,
            base_url,
            format,
            policy: ErrorOnNonSuccess,
        }
    }
}

impl<C, F, P> ApiClient<C, F, P> {
    /// Replace the status classification policy.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Treat 404 as a valid "not found" outcome instead of an error.
    /// let client = ApiClient::json(transport, url)?
    ///     .with_policy(AllowStatuses::new([404]));
    /// let user: Option<User> = client.get("/users/999").await?;
    /// ```
    #[must_use]
    pub fn with_policy<Q: StatusPolicy>(self, policy: Q) -> ApiClient<C, F, Q> {
        ApiClient {
            transport: self.transport,
            base_url: self.base_url,
            format: self.format,
            policy,
        }
    }

    /// Get a reference to the transport handle.
    #[must_use]
    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// Get the base URL all paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the body format.
    #[must_use]
    pub fn format(&self) -> &F {
        &self.format
    }

    /// Resolve a request path against the base URL.
    fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url.join(normalize(path)).map_err(Into::into)
    }
}

/// Strip exactly one leading `/`, if present.
///
/// The base-URL join supplies the separator; a leading slash on top of it
/// would resolve the path against the host root instead of the base path.
fn normalize(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

impl<C, F, P> ApiClient<C, F, P>
where
    C: HttpClient,
    F: BodyFormat,
    P: StatusPolicy,
{
    /// HTTP GET, returning the raw response.
    pub async fn get_raw(&self, path: &str) -> ApiResult<Response, F> {
        self.send(Method::Get, path, None).await
    }

    /// HTTP GET, decoding the response body as `T`.
    pub async fn get<T>(&self, path: &str) -> ApiResult<T, F>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.get_raw(path).await?;
        self.format.decode(&response).map_err(ApiError::Codec)
    }

    /// HTTP POST, returning the raw response.
    ///
    /// `data` is either a typed value (encoded by the format) or a prebuilt
    /// [`RequestBody`] sent as-is.
    pub async fn post_raw<'a, D>(
        &self,
        path: &str,
        data: impl Into<Payload<'a, D>>,
    ) -> ApiResult<Response, F>
    where
        D: Serialize + 'a,
    {
        let body = self.encode(data)?;
        self.send(Method::Post, path, Some(body)).await
    }

    /// HTTP POST, decoding the response body as `T`.
    pub async fn post<'a, T, D>(
        &self,
        path: &str,
        data: impl Into<Payload<'a, D>>,
    ) -> ApiResult<T, F>
    where
        T: DeserializeOwned + Default,
        D: Serialize + 'a,
    {
        let response = self.post_raw(path, data).await?;
        self.format.decode(&response).map_err(ApiError::Codec)
    }

    /// HTTP POST of a prebuilt wire body, returning the raw response.
    ///
    /// The body still goes through the format's encode hook, which passes
    /// prebuilt bodies through unchanged.
    pub async fn post_body(&self, path: &str, body: RequestBody) -> ApiResult<Response, F> {
        let body = self
            .format
            .encode::<()>(Payload::Raw(body))
            .map_err(ApiError::Codec)?;
        self.send(Method::Post, path, Some(body)).await
    }

    /// HTTP PUT, returning the raw response.
    pub async fn put_raw<'a, D>(
        &self,
        path: &str,
        data: impl Into<Payload<'a, D>>,
    ) -> ApiResult<Response, F>
    where
        D: Serialize + 'a,
    {
        let body = self.encode(data)?;
        self.send(Method::Put, path, Some(body)).await
    }

    /// HTTP PUT, decoding the response body as `T`.
    pub async fn put<'a, T, D>(
        &self,
        path: &str,
        data: impl Into<Payload<'a, D>>,
    ) -> ApiResult<T, F>
    where
        T: DeserializeOwned + Default,
        D: Serialize + 'a,
    {
        let response = self.put_raw(path, data).await?;
        self.format.decode(&response).map_err(ApiError::Codec)
    }

    /// HTTP PUT of a prebuilt wire body, returning the raw response.
    pub async fn put_body(&self, path: &str, body: RequestBody) -> ApiResult<Response, F> {
        let body = self
            .format
            .encode::<()>(Payload::Raw(body))
            .map_err(ApiError::Codec)?;
        self.send(Method::Put, path, Some(body)).await
    }

    /// HTTP DELETE, returning the raw response.
    pub async fn delete_raw(&self, path: &str) -> ApiResult<Response, F> {
        self.send(Method::Delete, path, None).await
    }

    /// HTTP DELETE, decoding the response body as `T`.
    pub async fn delete<T>(&self, path: &str) -> ApiResult<T, F>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.delete_raw(path).await?;
        self.format.decode(&response).map_err(ApiError::Codec)
    }

    fn encode<'a, D>(&self, data: impl Into<Payload<'a, D>>) -> ApiResult<RequestBody, F>
    where
        D: Serialize + 'a,
    {
        self.format.encode(data.into()).map_err(ApiError::Codec)
    }

    /// Shared dispatch: resolve, execute, branch on classification.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> ApiResult<Response, F> {
        let url = self.resolve(path).map_err(ApiError::Transport)?;

        let mut builder = Request::builder(method, url.clone());
        if let Some(body) = body {
            builder = builder.request_body(body);
        }
        let request = builder.build();

        debug!(%method, %url, "dispatching request");

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if response.is_success() || !self.policy.is_error(status) {
            return Ok(response);
        }

        let details = self.format.extract_error_details(&response);
        warn!(%method, %url, status, "response status classified as error");

        Err(ApiError::Status {
            status,
            uri: url,
            details,
        })
    }
}
