use actix_web::{
    get, post,
    web::{scope, Data, Path, Query, ServiceConfig},
    HttpResponse, Responder,
};

use super::dto::ResultsQuery;
use super::service::{JobService, ServiceError};
use crate::view::PageState;

#[get("")]
async fn list_jobs(service: Data<JobService>) -> impl Responder {
    HttpResponse::Ok().json(service.all_jobs().as_slice())
}

#[post("/fetch")]
async fn fetch_jobs(service: Data<JobService>) -> Result<HttpResponse, ServiceError> {
    let response = service.refresh_jobs().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/organizations")]
async fn organizations(service: Data<JobService>) -> impl Responder {
    HttpResponse::Ok().json(service.organizations())
}

#[get("/job-types")]
async fn job_types(service: Data<JobService>) -> impl Responder {
    HttpResponse::Ok().json(service.job_types())
}

#[get("/results")]
async fn job_results(service: Data<JobService>, query: Query<ResultsQuery>) -> impl Responder {
    let page = PageState::from_query(query.page.as_deref());
    HttpResponse::Ok().json(service.results(page))
}

#[get("/results/{id}")]
async fn job_listing(
    service: Data<JobService>,
    path: Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.job(path.into_inner())?;
    Ok(HttpResponse::Ok().json(job))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("jobs")
            .service(list_jobs)
            .service(fetch_jobs)
            .service(organizations)
            .service(job_types)
            .service(job_results)
            .service(job_listing),
    );
}
