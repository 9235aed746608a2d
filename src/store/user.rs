use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::filter::FilterCriteria;

/// Holds the filter selections made by the user
#[derive(Clone)]
pub struct UserFilterStore {
    criteria: Arc<watch::Sender<FilterCriteria>>,
    revision: Arc<AtomicU64>,
}

impl Default for UserFilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserFilterStore {
    pub fn new() -> Self {
        let (criteria, _) = watch::channel(FilterCriteria::default());
        Self {
            criteria: Arc::new(criteria),
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Copy of the current selections
    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.borrow().clone()
    }

    /// Number of mutating actions applied so far
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterCriteria> {
        self.criteria.subscribe()
    }

    /// Replace the selected organizations with `organizations`
    pub fn add_selected_organizations<I, S>(&self, organizations: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected = collect_set(organizations);
        self.update("add_selected_organizations", |c| c.selected_organizations = selected);
    }

    /// Replace the selected job types with `job_types`
    pub fn add_selected_job_types<I, S>(&self, job_types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected = collect_set(job_types);
        self.update("add_selected_job_types", |c| c.selected_job_types = selected);
    }

    /// Replace the selected degrees with `degrees`
    pub fn add_selected_degrees<I, S>(&self, degrees: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected = collect_set(degrees);
        self.update("add_selected_degrees", |c| c.selected_degrees = selected);
    }

    /// Store the search term with surrounding whitespace removed
    pub fn update_skills_search_term(&self, term: &str) {
        let term = term.trim().to_string();
        self.update("update_skills_search_term", |c| c.skills_search_term = term);
    }

    /// Reset every selection in a single change
    pub fn clear_user_job_filter_selections(&self) {
        self.update("clear_user_job_filter_selections", |c| {
            *c = FilterCriteria::default()
        });
    }

    fn update(&self, action: &str, modify: impl FnOnce(&mut FilterCriteria)) {
        self.criteria.send_modify(modify);
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("User filters: {} applied (revision {})", action, revision);
    }
}

fn collect_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}
