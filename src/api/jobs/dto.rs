use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::FetchOutcome;

/// Query string of the results page
#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    /// Raw page parameter; anything that is not a positive integer means page 1
    pub page: Option<String>,
}

/// Response for a fetch action
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    pub message: String,
    #[serde(flatten)]
    pub outcome: FetchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}
