// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    CmsConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig,
};

/// Environment variable holding the CMS API key.
///
/// Kept out of the layered `SERVER_*` namespace: the deployment platform
/// sets this one directly, optionally via a local `.env.local` file.
pub const CMS_API_KEY_VAR: &str = "MICROCMS_API_KEY";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 4000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Kuraweb/0.1")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("site.root", "site")?
            .set_default("site.index_file", "index.html")?
            .set_default("cms.service_id", "example")?;

        // The secret never comes from the config file
        if let Ok(key) = std::env::var(CMS_API_KEY_VAR) {
            builder = builder.set_override("cms.api_key", key)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
