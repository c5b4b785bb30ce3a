//! HTTP API layer for the on-demand check mode.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - API key authentication and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
