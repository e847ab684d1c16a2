//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the conversion endpoints
//! - Request handlers for JSON and download responses
//! - LRU conversion cache
//! - Request logging middleware with request ids
//! - CORS middleware

pub mod cache;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
