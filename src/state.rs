//! Application state management
//!
//! This module defines the AppState structure that holds:
//! - Conversion cache (LRU)
//! - Metrics collector
//! - Server configuration

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::http::cache::{ConversionCache, ConversionKey};
use crate::metrics::Metrics;
use crate::subtitle::{convert_scripts, Conversion, SrtSettings};

/// Application state shared across all handlers
pub struct AppState {
    /// Recent conversions
    pub conversion_cache: ConversionCache,

    /// Request and conversion counters
    pub metrics: Metrics,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self {
            conversion_cache: ConversionCache::new(config.cache.clone()),
            metrics: Metrics::new(),
            config,
        }
    }

    /// Create AppState with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ServerConfig::default())
    }

    /// Convert scripts, reusing a cached result when the same input was seen.
    ///
    /// Returns the conversion and whether it came from the cache.
    pub fn convert(&self, scripts: &[String], settings: SrtSettings) -> (Arc<Conversion>, bool) {
        let key = ConversionKey::new(scripts, settings);
        if let Some(conversion) = self.conversion_cache.get(&key) {
            return (conversion, true);
        }

        let conversion = Arc::new(convert_scripts(scripts, &settings));
        self.metrics.record_conversion(conversion.entry_count());
        self.conversion_cache.insert(key, conversion.clone());
        (conversion, false)
    }
}
