//! Core types and traits for carapace, a typed HTTP API client base layer.
//!
//! This crate provides the foundational pieces used by `carapace`:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`RequestBody`] and [`ContentType`] - prebuilt wire bodies
//! - [`Error`], [`ApiError`] and [`Result`] - Error handling
//! - [`HttpClient`] - transport trait for HTTP execution
//! - [`BodyFormat`] - pluggable encode/decode/error-classification contract
//! - [`StatusPolicy`] - which status codes raise
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod client;
mod error;
mod format;
mod method;
mod policy;
mod request;
mod response;

pub use body::{ContentType, RequestBody, from_json, to_json};
pub use client::HttpClient;
pub use error::{ApiError, Error, Result};
pub use format::{BodyFormat, ErrorDetails, Payload};
pub use method::Method;
pub use policy::{AllowStatuses, ErrorOnNonSuccess, StatusPolicy};
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
