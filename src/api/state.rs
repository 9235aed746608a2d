use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::jobs::JobService;

pub struct AppState {
    app_name: String,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(name: &str) -> Self {
        AppState {
            app_name: name.into(),
            started_at: Utc::now(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateResponse<'a> {
    app_name: &'a str,
    started_at: DateTime<Utc>,
    job_count: usize,
    degree_count: usize,
    jobs_fetched_at: Option<DateTime<Utc>>,
    degrees_fetched_at: Option<DateTime<Utc>>,
}

#[get("")]
async fn get_state(data: web::Data<AppState>, service: web::Data<JobService>) -> impl Responder {
    let jobs = service.job_store().snapshot();
    let degrees = service.degree_store().snapshot();

    HttpResponse::Ok().json(StateResponse {
        app_name: &data.app_name,
        started_at: data.started_at,
        job_count: jobs.value.len(),
        degree_count: degrees.value.len(),
        jobs_fetched_at: jobs.fetched_at,
        degrees_fetched_at: degrees.fetched_at,
    })
}

pub fn state_config(config: &mut web::ServiceConfig) {
    config.service(web::scope("state").service(get_state));
}
