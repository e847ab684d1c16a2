//! Server configuration

use serde::{Deserialize, Serialize};

use crate::subtitle::SrtSettings;

/// Conversion cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached conversions
    pub max_entries: usize,

    /// Time-to-live for cached conversions in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            ttl_secs: 600, // 10 minutes
        }
    }
}

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of scripts in a single request
    pub max_scripts: usize,

    /// Maximum request body size in megabytes
    pub max_request_size_mb: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_scripts: 50,
            max_request_size_mb: 2,
        }
    }
}

impl LimitsConfig {
    /// Get maximum request body size in bytes
    pub fn max_request_bytes(&self) -> usize {
        self.max_request_size_mb * 1024 * 1024
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Converter limits and timing
    pub subtitle: SrtSettings,

    /// Request limits
    pub limits: LimitsConfig,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    /// File name offered for SRT downloads
    pub download_filename: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cache: CacheConfig::default(),
            subtitle: SrtSettings::default(),
            limits: LimitsConfig::default(),
            cors_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            download_filename: "legendas.srt".to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether logs should be emitted as JSON lines
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
