//! Client side of the upstream jobs API.
//!
//! Stores only talk to [`JobsApi`], so tests can hand them an in-memory
//! implementation instead of [`HttpJobsApi`].

mod http;

pub use http::HttpJobsApi;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Degree, Job};

/// Failures surfaced by a jobs API call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, body read)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The body was not the expected JSON shape
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Base URL could not be joined with an endpoint path
    #[error("invalid jobs API url: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Read-only access to the jobs API.
///
/// Every call is a fresh request: no retries, no caching.
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// `GET <base>/jobs`
    async fn fetch_jobs(&self) -> Result<Vec<Job>>;

    /// `GET <base>/degrees`
    async fn fetch_degrees(&self) -> Result<Vec<Degree>>;
}
