pub mod degrees;
pub mod filters;
pub mod health;
pub mod jobs;
pub mod state;
pub mod validation;

use actix_web::web::ServiceConfig;

/// Register every HTTP endpoint of the service
pub fn routes(config: &mut ServiceConfig) {
    config
        .configure(health::health_config)
        .configure(state::state_config)
        .configure(jobs::handlers::job_config)
        .configure(degrees::degree_config)
        .configure(filters::filter_config);
}
