//! Configuration management for the relay

use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub query_service: QueryServiceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes. Prevents DoS via large payloads.
    /// Default: 1 MB
    #[serde(default = "default_max_request_body_size")]
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryServiceConfig {
    /// Endpoint of the query execution service (`POST {url}` with a
    /// `{sql, args}` payload).
    #[serde(default = "default_query_service_url")]
    pub url: String,
    /// Outbound HTTP timeout in seconds. A hung query service must not pin
    /// request tasks indefinitely. Default: 10
    #[serde(default = "default_query_service_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON formatting for logs (recommended for production)
    #[serde(default)]
    pub json: bool,
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_max_request_body_size() -> usize {
    1024 * 1024 // 1 MB
}

fn default_query_service_url() -> String {
    "http://localhost:8001/query".to_string()
}

fn default_query_service_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment and config files
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            // Start with defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default(
                "server.max_request_body_size",
                default_max_request_body_size() as i64,
            )?
            .set_default("query_service.url", default_query_service_url())?
            .set_default(
                "query_service.timeout_seconds",
                default_query_service_timeout() as i64,
            )?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            // Uses double underscore (__) to map to nested config structure
            // Example: MEDREC__QUERY_SERVICE__URL -> config.query_service.url
            .add_source(
                config::Environment::with_prefix("MEDREC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;

        // Convenience escape hatches: the reference deployment configures the
        // listen port via a bare PORT variable, honored when no explicit
        // MEDREC__ override is present. Same for QUERY_SERVICE_URL.
        if std::env::var("MEDREC__SERVER__PORT").is_err() {
            if let Ok(port) = std::env::var("PORT") {
                config.server.port = port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a port number, got '{port}'"))?;
            }
        }
        if std::env::var("MEDREC__QUERY_SERVICE__URL").is_err() {
            if let Ok(url) = std::env::var("QUERY_SERVICE_URL") {
                config.query_service.url = url;
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        Ok(addr.parse()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let url = self.query_service.url.trim();
        if url.is_empty() {
            return Err("query_service.url must not be empty".to_string());
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!(
                "query_service.url must be an http(s) URL, got '{url}'"
            ));
        }
        if self.query_service.timeout_seconds == 0 {
            return Err("query_service.timeout_seconds must be > 0".to_string());
        }
        if self.server.max_request_body_size == 0 {
            return Err("server.max_request_body_size must be > 0".to_string());
        }
        Ok(())
    }
}
