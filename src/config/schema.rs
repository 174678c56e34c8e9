//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the health
//! engine. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the health engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Master switch for the whole health subsystem.
    pub enabled: bool,

    /// Run a logged evaluation pass at startup.
    pub startup_log: bool,

    /// Shared timeout for one concurrent evaluation pass, in milliseconds.
    pub evaluation_timeout_ms: u64,

    /// Per-request timeout for HTTP probes, in milliseconds.
    pub probe_timeout_ms: u64,

    /// Database check settings.
    pub db: DbConfig,

    /// Document store check settings.
    pub mongo: MongoConfig,

    /// Message broker check settings.
    pub kafka: KafkaConfig,

    /// External service checks (one leaf per service).
    pub external: ExternalConfig,

    /// Endpoints listing and probe settings.
    pub endpoints: EndpointsConfig,

    /// Diagnostics endpoint server settings.
    pub server: ServerConfig,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            startup_log: true,
            evaluation_timeout_ms: 5_000,
            probe_timeout_ms: 2_000,
            db: DbConfig::default(),
            mongo: MongoConfig::default(),
            kafka: KafkaConfig::default(),
            external: ExternalConfig::default(),
            endpoints: EndpointsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl HealthConfig {
    pub fn evaluation_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.evaluation_timeout_ms)
    }

    pub fn probe_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Database check configuration. The connection itself is supplied by the
/// embedding application as a probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DbConfig {
    pub enabled: bool,

    /// Query executed to validate a checked-out connection.
    pub validation_query: String,

    /// Reported database type (e.g. "postgres", "mysql").
    pub r#type: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            validation_query: "SELECT 1".to_string(),
            r#type: "jdbc".to_string(),
        }
    }
}

/// Document store check configuration. Strategy: list collection names on
/// the configured database; no ping.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MongoConfig {
    pub enabled: bool,

    /// Database name override; empty means the client's default.
    pub database: Option<String>,
}

/// Message broker check configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct KafkaConfig {
    pub enabled: bool,
}

/// External service check set.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExternalConfig {
    pub services: Vec<ExternalServiceConfig>,
}

/// One external service leaf.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExternalServiceConfig {
    /// Child name under the `external` composite.
    pub name: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Full URL probed for reachability.
    pub url: String,
}

/// Endpoints check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub enabled: bool,

    /// Cap on the number of routes listed in the details.
    pub max_list: usize,

    /// Base URL probed paths are resolved against (e.g. "http://localhost:8080").
    pub probe_base_url: Option<String>,

    /// Allow-listed paths to probe (e.g. ["/demo/endpoints"]).
    pub probe_paths: Vec<String>,

    /// Preferred probe verb: HEAD, GET or OPTIONS.
    pub probe_method: String,

    pub allow_get_fallback: bool,

    pub allow_options_fallback: bool,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_list: 50,
            probe_base_url: None,
            probe_paths: Vec::new(),
            probe_method: "HEAD".to_string(),
            allow_get_fallback: true,
            allow_options_fallback: true,
        }
    }
}

/// Diagnostics endpoint server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g. "127.0.0.1:8081").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}
