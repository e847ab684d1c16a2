//! Integration tests
//!
//! Fixtures, an SRT reader that checks converter output against its timing
//! and size rules, and end-to-end tests that drive the HTTP router.

pub mod validation;
