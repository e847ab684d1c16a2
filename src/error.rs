//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::subtitle::SettingsError;

/// Main error type for the SRT server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid subtitle settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Too many scripts: {count} (maximum {max})")]
    TooManyScripts { count: usize, max: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Short label used for error metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Settings(_) => "invalid_settings",
            ServerError::TooManyScripts { .. } => "too_many_scripts",
            ServerError::Config(_) => "config",
            ServerError::Io(_) => "io",
            ServerError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Settings(_) | ServerError::TooManyScripts { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ServerError>;
