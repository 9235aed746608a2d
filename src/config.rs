use std::env;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the jobs API, e.g. http://localhost:3000
    /// `/jobs` and `/degrees` are requested relative to it
    pub jobs_api_url: String,

    /// Address the HTTP server binds to
    /// Default: 127.0.0.1
    pub bind_address: String,

    /// Port the HTTP server listens on
    /// Default: 8080
    pub port: u16,

    /// Directory for rotating log files
    /// Default: logs
    pub log_dir: String,

    /// Maximum payload size for all requests (in bytes)
    /// Default: 1MB (1024 * 1024)
    pub max_payload_size: usize,

    /// Seconds between background refreshes of jobs and degrees
    /// Default: 0 (disabled)
    pub refresh_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required environment variables:
    /// - JOBS_API_URL: base URL of the jobs API
    ///
    /// Optional environment variables:
    /// - BIND_ADDRESS (default: 127.0.0.1)
    /// - PORT (default: 8080)
    /// - LOG_DIR (default: logs)
    /// - MAX_PAYLOAD_SIZE: Maximum request payload size in bytes (default: 1048576 = 1MB)
    /// - JOBS_REFRESH_INTERVAL_SECS: background refresh period, 0 disables (default: 0)
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let jobs_api_url = env::var("JOBS_API_URL")
            .map_err(|_| "JOBS_API_URL must be set in .env file or environment".to_string())?;

        Self::from_lookup(jobs_api_url, |key| env::var(key).ok())
    }

    fn from_lookup(
        jobs_api_url: String,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        if jobs_api_url.trim().is_empty() {
            return Err("JOBS_API_URL must not be empty".to_string());
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("PORT must be a valid port number, got {raw:?}"))?,
            None => 8080,
        };

        Ok(Config {
            jobs_api_url,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            max_payload_size: lookup("MAX_PAYLOAD_SIZE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
            refresh_interval_secs: lookup("JOBS_REFRESH_INTERVAL_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }
}
