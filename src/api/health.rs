use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::warn;

use super::jobs::JobService;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    jobs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn jobs_status(service: &JobService) -> String {
    if service.jobs_loaded() {
        format!("loaded ({})", service.all_jobs().len())
    } else {
        "not_loaded".to_string()
    }
}

/// Health check endpoint
///
/// Reports whether job listings have been fetched. Never fails: an empty
/// store is still a healthy process.
#[get("/health")]
async fn health_check(service: web::Data<JobService>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        jobs: jobs_status(&service),
        error: None,
    })
}

/// Readiness check endpoint
///
/// Ready once the first jobs response has been stored.
/// Returns 503 until then.
#[get("/ready")]
async fn readiness_check(service: web::Data<JobService>) -> impl Responder {
    if service.jobs_loaded() {
        HttpResponse::Ok().json(HealthResponse {
            status: "ready".to_string(),
            jobs: jobs_status(&service),
            error: None,
        })
    } else {
        warn!("Readiness check failed: jobs not fetched yet");
        HttpResponse::ServiceUnavailable().json(HealthResponse {
            status: "not_ready".to_string(),
            jobs: jobs_status(&service),
            error: Some("Jobs have not been fetched yet".to_string()),
        })
    }
}

/// Liveness check endpoint
///
/// Simple check that the process is alive. Does not look at the stores.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive".to_string(),
        jobs: "not_checked".to_string(),
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
