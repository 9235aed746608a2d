use serde::{Deserialize, Serialize};

/// A single job listing as returned by the jobs API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: u64,
    pub title: String,
    pub organization: String,
    pub job_type: String,
    pub degree: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub minimum_qualifications: Vec<String>,
    #[serde(default)]
    pub preferred_qualifications: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub date_added: String,
}

/// Degree level a candidate can filter listings by
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Degree {
    pub id: u64,
    pub degree: String,
}
