//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{CacheConfig, LimitsConfig, ServerConfig};
use crate::subtitle::SrtSettings;

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Converter settings
    pub subtitle: Option<SubtitleSettings>,
    /// Cache settings
    pub cache: Option<CacheSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
    /// Limits settings
    pub limits: Option<LimitsSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
    /// File name offered for SRT downloads
    pub download_filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleSettings {
    /// Maximum characters per block
    pub max_chars_per_block: Option<usize>,
    /// Maximum words per block
    pub max_words_per_block: Option<usize>,
    /// Block duration in seconds
    pub block_duration_secs: Option<u64>,
    /// Pause between blocks in seconds
    pub block_gap_secs: Option<u64>,
    /// Pause between scripts in seconds
    pub script_gap_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of cached conversions
    pub max_entries: usize,
    /// TTL for cached conversions in seconds
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Maximum scripts per request
    pub max_scripts: Option<usize>,
    /// Maximum request body size in MB
    pub max_request_size_mb: Option<usize>,
}

impl SubtitleSettings {
    fn into_srt_settings(self) -> SrtSettings {
        let defaults = SrtSettings::default();
        SrtSettings {
            max_chars_per_block: self.max_chars_per_block.unwrap_or(defaults.max_chars_per_block),
            max_words_per_block: self.max_words_per_block.unwrap_or(defaults.max_words_per_block),
            block_duration_secs: self.block_duration_secs.unwrap_or(defaults.block_duration_secs),
            block_gap_secs: self.block_gap_secs.unwrap_or(defaults.block_gap_secs),
            script_gap_secs: self.script_gap_secs.unwrap_or(defaults.script_gap_secs),
        }
    }
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let srt = SrtSettings::default();
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_enabled: Some(true),
                download_filename: Some("legendas.srt".to_string()),
            },
            subtitle: Some(SubtitleSettings {
                max_chars_per_block: Some(srt.max_chars_per_block),
                max_words_per_block: Some(srt.max_words_per_block),
                block_duration_secs: Some(srt.block_duration_secs),
                block_gap_secs: Some(srt.block_gap_secs),
                script_gap_secs: Some(srt.script_gap_secs),
            }),
            cache: Some(CacheSettings {
                max_entries: 256,
                ttl_secs: 600,
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
            limits: Some(LimitsSettings {
                max_scripts: Some(50),
                max_request_size_mb: Some(2),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        let limits = self.limits.as_ref();
        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            cache: self
                .cache
                .map(|c| CacheConfig {
                    max_entries: c.max_entries,
                    ttl_secs: c.ttl_secs,
                })
                .unwrap_or_default(),
            subtitle: self
                .subtitle
                .map(SubtitleSettings::into_srt_settings)
                .unwrap_or_default(),
            limits: LimitsConfig {
                max_scripts: limits
                    .and_then(|l| l.max_scripts)
                    .unwrap_or(defaults.limits.max_scripts),
                max_request_size_mb: limits
                    .and_then(|l| l.max_request_size_mb)
                    .unwrap_or(defaults.limits.max_request_size_mb),
            },
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            log_level: self
                .logging
                .as_ref()
                .map(|l| l.level.clone())
                .unwrap_or(defaults.log_level),
            log_format: self
                .logging
                .and_then(|l| l.format)
                .unwrap_or(defaults.log_format),
            download_filename: self
                .server
                .download_filename
                .unwrap_or(defaults.download_filename),
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
