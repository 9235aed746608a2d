use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::{Parser, Subcommand};
use tokio::time::Duration;
use tracing::{error, info, warn};

use job_search::api::{self, jobs::JobService, state::AppState, validation};
use job_search::client::{HttpJobsApi, JobsApi};
use job_search::config::Config;
use job_search::logging;
use job_search::shutdown::ShutdownCoordinator;
use job_search::store::{DegreeStore, JobStore, UserFilterStore};
use job_search::view::PageState;
use job_search::worker::Refresher;

#[derive(Parser)]
#[command(name = "job-search", about = "Faceted job listing search over a jobs API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Fetch jobs once, apply the given filters and print one results page as JSON
    Search {
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: String,
        #[arg(long = "organization")]
        organizations: Vec<String>,
        #[arg(long = "job-type")]
        job_types: Vec<String>,
        #[arg(long = "degree")]
        degrees: Vec<String>,
        /// Case-insensitive match against job titles
        #[arg(long, default_value = "")]
        skill: String,
    },
}

fn other_error(message: impl ToString) -> io::Error {
    io::Error::other(message.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let config = Config::from_env().map_err(other_error)?;
    logging::init(&config.log_dir)?;

    let api: Arc<dyn JobsApi> = Arc::new(HttpJobsApi::new(&config.jobs_api_url).map_err(other_error)?);
    let user_store = UserFilterStore::new();
    let job_store = JobStore::new(api.clone(), user_store.clone());
    let degree_store = DegreeStore::new(api);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, job_store, degree_store, user_store).await,
        Command::Search {
            page,
            organizations,
            job_types,
            degrees,
            skill,
        } => {
            job_store.fetch_jobs().await.map_err(other_error)?;

            user_store.add_selected_organizations(organizations);
            user_store.add_selected_job_types(job_types);
            user_store.add_selected_degrees(degrees);
            user_store.update_skills_search_term(&skill);

            let view = job_store.derived_view(PageState::from_query(Some(&page)));
            let output = serde_json::to_string_pretty(&view).map_err(other_error)?;
            println!("{}", output);
            Ok(())
        }
    }
}

async fn serve(
    config: Config,
    job_store: JobStore,
    degree_store: DegreeStore,
    user_store: UserFilterStore,
) -> io::Result<()> {
    info!("Starting job-search application");
    info!("Configuration loaded successfully:");
    info!("  - Jobs API: {}", config.jobs_api_url);
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Refresh interval: {}s", config.refresh_interval_secs);

    // A failed first fetch is not fatal: /ready reports it and POST /jobs/fetch retries
    if let Err(e) = job_store.fetch_jobs().await {
        warn!("Initial jobs fetch failed: {}", e);
    }
    if let Err(e) = degree_store.fetch_degrees().await {
        warn!("Initial degrees fetch failed: {}", e);
    }

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let mut worker_handles = Vec::new();

    if config.refresh_interval_secs > 0 {
        let refresher = Refresher::new(job_store.clone(), degree_store.clone());
        let period = Duration::from_secs(config.refresh_interval_secs);
        let handle = tokio::spawn(async move {
            refresher.run(period, shutdown_rx).await;
        });
        worker_handles.push(handle);
        info!("Spawned background refresher");
    }

    let job_service = JobService::new(job_store, degree_store);
    let app_state = web::Data::new(AppState::new("job-search"));
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .app_data(app_state.clone())
            .app_data(web::Data::new(job_service.clone()))
            .app_data(web::Data::new(user_store.clone()))
            .app_data(payload_config)
            .app_data(validation::json_config(max_payload_size))
            .configure(api::routes)
    });

    info!("Server starting on http://{}:{}", config.bind_address, config.port);

    let server = server
        .bind((config.bind_address.as_str(), config.port))?
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let coordinator =
        ShutdownCoordinator::new(server_handle, server_task, worker_handles, shutdown_tx);

    coordinator.wait_for_shutdown().await.map_err(|e| {
        error!("Shutdown failed: {:?}", e);
        e
    })
}
