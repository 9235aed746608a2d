//! Paginated view over the filtered job listings.

use serde::Serialize;

use crate::filter::{filtered_jobs, FilterCriteria};
use crate::models::Job;

pub const PAGE_SIZE: usize = 10;

/// 1-based page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_number: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_number: usize) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: PAGE_SIZE,
        }
    }

    /// Parse the `page` query parameter; absent, non-numeric or zero means page 1
    pub fn from_query(page: Option<&str>) -> Self {
        let page_number = page
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(1);
        Self::new(page_number)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// What the results page displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub visible_jobs: Vec<Job>,
    pub total_filtered_count: usize,
    pub page_number: usize,
    pub max_page: usize,
    pub has_previous: bool,
    pub has_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<usize>,
}

/// Slice one page out of an already filtered list.
///
/// A page past the end yields no jobs; it is not clamped.
pub fn paginate(filtered: &[&Job], page: PageState) -> DerivedView {
    let total = filtered.len();
    let start = page.page_number.saturating_sub(1).saturating_mul(page.page_size);

    let visible_jobs = filtered
        .iter()
        .skip(start)
        .take(page.page_size)
        .map(|job| (*job).clone())
        .collect();

    let has_previous = page.page_number > 1;
    let has_next = page.page_number.saturating_mul(page.page_size) < total;

    DerivedView {
        visible_jobs,
        total_filtered_count: total,
        page_number: page.page_number,
        max_page: total.div_ceil(page.page_size.max(1)),
        has_previous,
        has_next,
        previous_page: has_previous.then(|| page.page_number - 1),
        next_page: has_next.then(|| page.page_number + 1),
    }
}

/// Filter then paginate in one step
pub fn derive_view(jobs: &[Job], criteria: &FilterCriteria, page: PageState) -> DerivedView {
    paginate(&filtered_jobs(jobs, criteria), page)
}
