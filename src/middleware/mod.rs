//! Middleware for the reputation API

mod tracing;

pub use tracing::request_tracing;
