//! Facet predicates over job listings.
//!
//! Within a facet the selected values are OR-ed, across facets the
//! predicates are AND-ed. An empty selection never excludes anything.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Job;

/// What the user currently has selected in the filter sidebar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub selected_organizations: BTreeSet<String>,
    pub selected_job_types: BTreeSet<String>,
    pub selected_degrees: BTreeSet<String>,
    pub skills_search_term: String,
}

impl FilterCriteria {
    /// True when no facet narrows the result set
    pub fn is_empty(&self) -> bool {
        self.selected_organizations.is_empty()
            && self.selected_job_types.is_empty()
            && self.selected_degrees.is_empty()
            && self.skills_search_term.is_empty()
    }
}

fn selected_or_any(selected: &BTreeSet<String>, value: &str) -> bool {
    selected.is_empty() || selected.contains(value)
}

pub fn include_by_organization(job: &Job, criteria: &FilterCriteria) -> bool {
    selected_or_any(&criteria.selected_organizations, &job.organization)
}

pub fn include_by_job_type(job: &Job, criteria: &FilterCriteria) -> bool {
    selected_or_any(&criteria.selected_job_types, &job.job_type)
}

pub fn include_by_degree(job: &Job, criteria: &FilterCriteria) -> bool {
    selected_or_any(&criteria.selected_degrees, &job.degree)
}

/// Case-insensitive substring match of the search term against the title
pub fn include_by_skill(job: &Job, criteria: &FilterCriteria) -> bool {
    let term = &criteria.skills_search_term;
    term.is_empty() || job.title.to_lowercase().contains(&term.to_lowercase())
}

pub fn include_job(job: &Job, criteria: &FilterCriteria) -> bool {
    include_by_organization(job, criteria)
        && include_by_job_type(job, criteria)
        && include_by_degree(job, criteria)
        && include_by_skill(job, criteria)
}

/// Jobs passing every facet, in collection order
pub fn filtered_jobs<'a>(jobs: &'a [Job], criteria: &FilterCriteria) -> Vec<&'a Job> {
    jobs.iter().filter(|job| include_job(job, criteria)).collect()
}

pub fn unique_organizations(jobs: &[Job]) -> BTreeSet<String> {
    jobs.iter().map(|job| job.organization.clone()).collect()
}

pub fn unique_job_types(jobs: &[Job]) -> BTreeSet<String> {
    jobs.iter().map(|job| job.job_type.clone()).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn job(id: u64, title: &str, organization: &str, job_type: &str, degree: &str) -> Job {
        Job {
            id,
            title: title.to_string(),
            organization: organization.to_string(),
            job_type: job_type.to_string(),
            degree: degree.to_string(),
            locations: vec!["Lisbon".to_string()],
            minimum_qualifications: vec!["Code".to_string()],
            preferred_qualifications: vec![],
            description: vec![],
            date_added: "2021-07-04".to_string(),
        }
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            job(1, "Vue Developer", "Google", "Full-time", "Master's"),
            job(2, "Rust Engineer", "Amazon", "Part-time", "Bachelor's"),
            job(3, "Angular Developer", "Google", "Intern", "Ph.D."),
            job(4, "Site Reliability", "Microsoft", "Full-time", "Bachelor's"),
        ]
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_criteria_keeps_every_job() {
        let jobs = sample_jobs();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());

        let result: Vec<Job> = filtered_jobs(&jobs, &criteria).into_iter().cloned().collect();
        assert_eq!(result, jobs);
    }

    #[test]
    fn organization_facet_has_no_omissions_and_no_extras() {
        let jobs = sample_jobs();
        let criteria = FilterCriteria {
            selected_organizations: set(&["Google", "Microsoft"]),
            ..Default::default()
        };

        let ids: Vec<u64> = filtered_jobs(&jobs, &criteria).iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn facets_combine_with_and() {
        let jobs = sample_jobs();
        let criteria = FilterCriteria {
            selected_organizations: set(&["Google"]),
            selected_job_types: set(&["Full-time", "Part-time"]),
            ..Default::default()
        };

        let ids: Vec<u64> = filtered_jobs(&jobs, &criteria).iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn degree_facet_matches_selected_degree() {
        let criteria = FilterCriteria {
            selected_degrees: set(&["Master's"]),
            ..Default::default()
        };
        assert!(include_by_degree(&job(1, "Dev", "Google", "Full-time", "Master's"), &criteria));
        assert!(!include_by_degree(&job(2, "Dev", "Google", "Full-time", "Ph.D."), &criteria));
    }

    #[test]
    fn job_type_facet_includes_everything_when_nothing_selected() {
        let criteria = FilterCriteria::default();
        assert!(include_by_job_type(&job(1, "Dev", "Google", "Full-TIme", "Master's"), &criteria));
    }

    #[test]
    fn skill_match_ignores_case() {
        let vue = job(1, "Vue Developer", "Google", "Full-time", "Master's");
        for term in ["Vue", "vue", "VUE", "vUe", "developer"] {
            let criteria = FilterCriteria {
                skills_search_term: term.to_string(),
                ..Default::default()
            };
            assert!(include_by_skill(&vue, &criteria), "term {term:?} should match");
        }

        let criteria = FilterCriteria {
            skills_search_term: "Rust".to_string(),
            ..Default::default()
        };
        assert!(!include_by_skill(&vue, &criteria));
    }

    #[test]
    fn unique_organizations_collapses_duplicates() {
        let jobs = vec![
            job(1, "A", "Google", "Full-time", "Master's"),
            job(2, "B", "Amazon", "Full-time", "Master's"),
            job(3, "C", "Google", "Full-time", "Master's"),
        ];
        assert_eq!(unique_organizations(&jobs), set(&["Google", "Amazon"]));
        assert_eq!(unique_job_types(&jobs), set(&["Full-time"]));
    }
}
