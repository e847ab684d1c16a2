#![allow(dead_code)]

//! SRT Narrator Server
//!
//! Converts narration scripts into SubRip subtitles. Sentences are packed
//! into fixed-length subtitle blocks and timed back to back, with a long
//! pause between consecutive scripts so each script lines up with its own
//! narrated segment.

mod config;
mod config_file;
mod error;
mod http;
mod metrics;
mod state;
mod subtitle;

#[cfg(test)]
mod integration;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "srt-narrator";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // `srt-narrator --init-config [path]` writes a default config and exits
    if args.get(1).map(String::as_str) == Some("--init-config") {
        let path = args.get(2).map(String::as_str).unwrap_or("config.toml");
        crate::config_file::generate_default_config(path)
            .map_err(|e| ServerError::Config(format!("{}: {}", path, e)))?;
        println!("Wrote default configuration to {}", path);
        return Ok(());
    }

    // Load configuration
    let config_path = args.get(1).cloned().unwrap_or_else(|| "config.toml".to_string());
    let (config, config_warning) = load_config(&config_path);

    // Initialize logging
    init_logging(&config);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    if let Some(warning) = config_warning {
        tracing::warn!("{}", warning);
    }
    config.subtitle.validate()?;
    tracing::info!("Configuration loaded: {:?}", config);

    // Create application state
    let state = Arc::new(AppState::new(config.clone()));

    // Background task: drop expired cache entries every 60 seconds.
    {
        let state_bg = Arc::clone(&state);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let removed = state_bg.conversion_cache.clear_expired();
                if removed > 0 {
                    tracing::debug!("Evicted {} expired conversion(s)", removed);
                }
            }
        });
    }

    // Build router
    let app = create_router(state.clone());

    // Start server
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| ServerError::Config(format!("Invalid listen address: {}", e)))?;
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the config file, falling back to defaults.
///
/// Logging is not up yet when this runs, so a load failure is handed back
/// as a message instead of being logged here.
fn load_config(path: &str) -> (ServerConfig, Option<String>) {
    if !std::path::Path::new(path).exists() {
        return (ServerConfig::default(), None);
    }
    match crate::config_file::ConfigFile::from_file(path) {
        Ok(cf) => (cf.into_server_config(), None),
        Err(e) => (
            ServerConfig::default(),
            Some(format!(
                "Failed to load config file {}: {}. Using defaults.",
                path, e
            )),
        ),
    }
}

/// Initialize logging with tracing
fn init_logging(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("srt_narrator={},tower_http=debug", config.log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
