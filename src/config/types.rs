// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Routes configuration
///
/// Canned replies keyed by exact request path. Entries given here are
/// merged over the built-in table, so a config file can add routes or
/// replace the built-in reply for the same path.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RoutesConfig {
    #[serde(default)]
    pub entries: HashMap<String, RouteReply>,
}

/// A canned reply - what to answer when a path matches
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteReply {
    /// Plain-text body, returned verbatim
    Text {
        body: String,
        #[serde(default = "default_reply_status")]
        status: u16,
    },
    /// JSON body, serialized once at table build time
    Json {
        body: serde_json::Value,
        #[serde(default = "default_reply_status")]
        status: u16,
    },
}

impl RouteReply {
    pub const fn status(&self) -> u16 {
        match self {
            Self::Text { status, .. } | Self::Json { status, .. } => *status,
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_reply_status() -> u16 {
    200
}
