// Configuration module entry point
// Loads application configuration from file, environment, and defaults

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, RouteReply, RoutesConfig, ServerConfig,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("CANNED"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8030)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "canned-server/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_instance() {
        let cfg = Config::load_from("does-not-exist").expect("defaults should deserialize");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8030);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(!cfg.http.enable_cors);
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert!(cfg.routes.entries.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("does-not-exist").expect("defaults should deserialize");
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 8080;
        let addr = cfg.get_socket_addr().expect("valid address");
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let mut cfg = Config::load_from("does-not-exist").expect("defaults should deserialize");
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
