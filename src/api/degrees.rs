use actix_web::{
    get, post,
    web::{scope, Data, ServiceConfig},
    HttpResponse, Responder,
};

use super::jobs::{JobService, ServiceError};

#[get("")]
async fn list_degrees(service: Data<JobService>) -> impl Responder {
    HttpResponse::Ok().json(service.all_degrees().as_slice())
}

#[post("/fetch")]
async fn fetch_degrees(service: Data<JobService>) -> Result<HttpResponse, ServiceError> {
    let response = service.refresh_degrees().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/unique")]
async fn unique_degrees(service: Data<JobService>) -> impl Responder {
    HttpResponse::Ok().json(service.unique_degrees())
}

pub fn degree_config(config: &mut ServiceConfig) {
    config.service(
        scope("degrees")
            .service(list_degrees)
            .service(fetch_degrees)
            .service(unique_degrees),
    );
}
