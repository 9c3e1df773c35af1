//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for easy
//! glob importing:
//!
//! ```ignore
//! use carapace::prelude::*;
//! ```

pub use crate::{
    AllowStatuses, ApiClient, ApiError, BodyFormat, ContentType, Error, ErrorDetails,
    ErrorOnNonSuccess, HttpClient, HyperTransport, JsonApiClient, JsonFormat, Method, Payload,
    Request, RequestBody, Response, Result, StatusCode, StatusPolicy, TransportConfig, from_json,
    header, to_json,
};
pub use serde::{Deserialize, Serialize};
