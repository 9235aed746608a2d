use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{FetchOutcome, FetchedValue, Snapshot, UserFilterStore};
use crate::client::{self, JobsApi};
use crate::filter;
use crate::models::Job;
use crate::view::{self, DerivedView, PageState};

/// Holds the fetched job listings and answers filter questions about them
/// against the selections in a [`UserFilterStore`].
#[derive(Clone)]
pub struct JobStore {
    api: Arc<dyn JobsApi>,
    jobs: FetchedValue<Vec<Job>>,
    user: UserFilterStore,
}

impl JobStore {
    pub fn new(api: Arc<dyn JobsApi>, user: UserFilterStore) -> Self {
        Self {
            api,
            jobs: FetchedValue::new(),
            user,
        }
    }

    /// Fetch all jobs and replace the stored collection with the response.
    ///
    /// On error the previous collection is kept and the error is returned.
    /// A response that arrives after one from a later call is dropped.
    pub async fn fetch_jobs(&self) -> client::Result<FetchOutcome> {
        let ticket = self.jobs.issue_ticket();
        debug!("Fetching jobs (ticket {})", ticket);

        let jobs = match self.api.fetch_jobs().await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Fetching jobs failed, keeping previous listings: {}", e);
                return Err(e);
            }
        };
        let count = jobs.len();

        if self.jobs.apply(ticket, jobs) {
            info!("Stored {} jobs", count);
            Ok(FetchOutcome::Applied { count })
        } else {
            debug!("Dropped stale jobs response (ticket {})", ticket);
            Ok(FetchOutcome::Stale)
        }
    }

    pub fn jobs(&self) -> Arc<Vec<Job>> {
        self.jobs.value()
    }

    /// Replace the collection without going through the API
    pub fn set_jobs(&self, jobs: Vec<Job>) {
        self.jobs.replace(jobs);
    }

    pub fn snapshot(&self) -> Snapshot<Vec<Job>> {
        self.jobs.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<Vec<Job>>> {
        self.jobs.subscribe()
    }

    pub fn user_filters(&self) -> &UserFilterStore {
        &self.user
    }

    pub fn find_job(&self, id: u64) -> Option<Job> {
        self.jobs.value().iter().find(|job| job.id == id).cloned()
    }

    pub fn unique_organizations(&self) -> BTreeSet<String> {
        filter::unique_organizations(&self.jobs.value())
    }

    pub fn unique_job_types(&self) -> BTreeSet<String> {
        filter::unique_job_types(&self.jobs.value())
    }

    pub fn include_by_organization(&self, job: &Job) -> bool {
        filter::include_by_organization(job, &self.user.criteria())
    }

    pub fn include_by_job_type(&self, job: &Job) -> bool {
        filter::include_by_job_type(job, &self.user.criteria())
    }

    pub fn include_by_degree(&self, job: &Job) -> bool {
        filter::include_by_degree(job, &self.user.criteria())
    }

    pub fn include_by_skill(&self, job: &Job) -> bool {
        filter::include_by_skill(job, &self.user.criteria())
    }

    /// Jobs matching every current selection, in fetch order
    pub fn filtered_jobs(&self) -> Vec<Job> {
        let jobs = self.jobs.value();
        let criteria = self.user.criteria();
        filter::filtered_jobs(&jobs, &criteria)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The requested page of [`JobStore::filtered_jobs`]
    pub fn derived_view(&self, page: PageState) -> DerivedView {
        let jobs = self.jobs.value();
        view::derive_view(&jobs, &self.user.criteria(), page)
    }
}
