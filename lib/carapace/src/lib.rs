//! Typed HTTP API client base layer.
//!
//! Carapace standardizes the repetitive part of wrapping a remote HTTP API:
//! dispatching verbs, encoding request bodies, decoding typed responses, and
//! mapping error statuses into a structured error carrying best-effort
//! parsed details. Transports and body formats are pluggable; a hyper-based
//! transport and a JSON format are bundled.
//!
//! # Example
//!
//! ```ignore
//! use carapace::prelude::*;
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct User {
//!     id: u64,
//!     display_name: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct ApiFault {
//!     code: String,
//!     message: String,
//! }
//!
//! let client: JsonApiClient<HyperTransport, ApiFault> =
//!     ApiClient::json(HyperTransport::new(), "https://api.example.com")?;
//!
//! let user: User = client.get("/users/42").await?;
//!
//! match client.get::<User>("/users/999").await {
//!     Ok(user) => println!("{user:?}"),
//!     Err(err) if err.is_not_found() => println!("no such user"),
//!     Err(err) => return Err(err.into()),
//! }
//! ```

mod api_client;
mod config;
mod json;
pub mod prelude;
mod transport;

// Re-export client types
pub use api_client::{ApiClient, ApiResult};
pub use config::{TransportConfig, TransportConfigBuilder};
pub use json::{JsonApiClient, JsonFormat};
pub use transport::HyperTransport;

// Re-export core types
pub use carapace_core::{
    AllowStatuses, ApiError, BodyFormat, ContentType, Error, ErrorDetails, ErrorOnNonSuccess,
    HttpClient, Method, Payload, Request, RequestBody, RequestBuilder, Response, Result,
    StatusPolicy, from_json, to_json,
};

// Re-export http types for status codes and headers
pub use carapace_core::{StatusCode, header};
