use std::collections::BTreeSet;
use std::sync::Arc;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, info, warn};

use super::dto::FetchResponse;
use crate::api::validation::ErrorResponse;
use crate::client::ApiError;
use crate::models::{Degree, Job};
use crate::store::{DegreeStore, FetchOutcome, JobStore, UserFilterStore};
use crate::view::{DerivedView, PageState};

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The jobs API call failed
    #[error("Upstream error: {0}")]
    Upstream(#[from] ApiError),

    /// Job not found
    #[error("Job not found: {0}")]
    NotFound(u64),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Upstream(e) => {
                error!("Upstream error: {}", e);
                HttpResponse::BadGateway().json(ErrorResponse {
                    error: "Failed to reach jobs API".to_string(),
                    fields: serde_json::json!({"message": e.to_string()}),
                })
            }
            ServiceError::NotFound(id) => {
                warn!("Job not found: {}", id);
                HttpResponse::NotFound().json(ErrorResponse {
                    error: "Not found".to_string(),
                    fields: serde_json::json!({"message": format!("Job with id {} not found", id)}),
                })
            }
        }
    }
}

/// Job search operations backing the HTTP handlers
#[derive(Clone)]
pub struct JobService {
    jobs: JobStore,
    degrees: DegreeStore,
}

impl JobService {
    pub fn new(jobs: JobStore, degrees: DegreeStore) -> Self {
        Self { jobs, degrees }
    }

    /// Wire fresh stores around `api`, sharing `user` for filter selections
    pub fn from_api(api: Arc<dyn crate::client::JobsApi>, user: UserFilterStore) -> Self {
        Self::new(JobStore::new(api.clone(), user), DegreeStore::new(api))
    }

    pub fn job_store(&self) -> &JobStore {
        &self.jobs
    }

    pub fn degree_store(&self) -> &DegreeStore {
        &self.degrees
    }

    /// True once a jobs response has been stored
    pub fn jobs_loaded(&self) -> bool {
        self.jobs.snapshot().fetched_at.is_some()
    }

    /// Refetch all jobs from the API
    pub async fn refresh_jobs(&self) -> Result<FetchResponse, ServiceError> {
        info!("Service: Refreshing jobs");
        let outcome = self.jobs.fetch_jobs().await?;

        Ok(FetchResponse {
            message: fetch_message("jobs", outcome),
            outcome,
            fetched_at: self.jobs.snapshot().fetched_at,
        })
    }

    /// Refetch all degrees from the API
    pub async fn refresh_degrees(&self) -> Result<FetchResponse, ServiceError> {
        info!("Service: Refreshing degrees");
        let outcome = self.degrees.fetch_degrees().await?;

        Ok(FetchResponse {
            message: fetch_message("degrees", outcome),
            outcome,
            fetched_at: self.degrees.snapshot().fetched_at,
        })
    }

    pub fn all_jobs(&self) -> Arc<Vec<Job>> {
        self.jobs.jobs()
    }

    pub fn job(&self, id: u64) -> Result<Job, ServiceError> {
        self.jobs.find_job(id).ok_or(ServiceError::NotFound(id))
    }

    pub fn results(&self, page: PageState) -> DerivedView {
        let view = self.jobs.derived_view(page);
        info!(
            "Service: Page {} shows {} of {} matching jobs",
            view.page_number,
            view.visible_jobs.len(),
            view.total_filtered_count
        );
        view
    }

    pub fn organizations(&self) -> BTreeSet<String> {
        self.jobs.unique_organizations()
    }

    pub fn job_types(&self) -> BTreeSet<String> {
        self.jobs.unique_job_types()
    }

    pub fn all_degrees(&self) -> Arc<Vec<Degree>> {
        self.degrees.degrees()
    }

    pub fn unique_degrees(&self) -> Vec<String> {
        self.degrees.unique_degrees()
    }
}

fn fetch_message(what: &str, outcome: FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Applied { count } => format!("Fetched {} {}", count, what),
        FetchOutcome::Stale => format!("A newer {} response was already stored", what),
    }
}
