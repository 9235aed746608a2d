use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, JobsApi, Result};
use crate::models::{Degree, Job};

/// [`JobsApi`] backed by `reqwest`
#[derive(Clone, Debug)]
pub struct HttpJobsApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpJobsApi {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        // Keep a trailing slash so `join` appends instead of replacing the last segment
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;
        debug!("Response from {}: status={}, {} bytes", url, status, body.len());

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl JobsApi for HttpJobsApi {
    async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        self.get_json("jobs").await
    }

    async fn fetch_degrees(&self) -> Result<Vec<Degree>> {
        self.get_json("degrees").await
    }
}
