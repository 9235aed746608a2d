//! Read and update the user's filter selections.
//!
//! Every update replaces the whole facet and answers with the resulting criteria.

use actix_web::{
    delete, get, put,
    web::{scope, Data, ServiceConfig},
    HttpResponse, Responder,
};
use actix_web_validator::Json;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::store::UserFilterStore;

/// Checked values of one checkbox group
#[derive(Debug, Deserialize, Validate)]
pub struct SelectionRequest {
    #[validate(length(max = 100, message = "At most 100 values can be selected"))]
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SkillsRequest {
    #[validate(length(max = 200, message = "Search term must be at most 200 characters"))]
    pub term: String,
}

#[get("")]
async fn get_filters(store: Data<UserFilterStore>) -> impl Responder {
    HttpResponse::Ok().json(store.criteria())
}

#[put("/organizations")]
async fn set_organizations(
    store: Data<UserFilterStore>,
    body: Json<SelectionRequest>,
) -> impl Responder {
    let body = body.into_inner();
    info!("Selecting {} organizations", body.values.len());
    store.add_selected_organizations(body.values);
    HttpResponse::Ok().json(store.criteria())
}

#[put("/job-types")]
async fn set_job_types(
    store: Data<UserFilterStore>,
    body: Json<SelectionRequest>,
) -> impl Responder {
    let body = body.into_inner();
    info!("Selecting {} job types", body.values.len());
    store.add_selected_job_types(body.values);
    HttpResponse::Ok().json(store.criteria())
}

#[put("/degrees")]
async fn set_degrees(store: Data<UserFilterStore>, body: Json<SelectionRequest>) -> impl Responder {
    let body = body.into_inner();
    info!("Selecting {} degrees", body.values.len());
    store.add_selected_degrees(body.values);
    HttpResponse::Ok().json(store.criteria())
}

#[put("/skills")]
async fn set_skills(store: Data<UserFilterStore>, body: Json<SkillsRequest>) -> impl Responder {
    store.update_skills_search_term(&body.term);
    HttpResponse::Ok().json(store.criteria())
}

#[delete("")]
async fn clear_filters(store: Data<UserFilterStore>) -> impl Responder {
    info!("Clearing all filter selections");
    store.clear_user_job_filter_selections();
    HttpResponse::Ok().json(store.criteria())
}

pub fn filter_config(config: &mut ServiceConfig) {
    config.service(
        scope("filters")
            .service(get_filters)
            .service(set_organizations)
            .service(set_job_types)
            .service(set_degrees)
            .service(set_skills)
            .service(clear_filters),
    );
}
