//! HTTP request handlers for API endpoints.

pub mod check;
pub mod health;

pub use check::{check_handler, method_not_allowed_handler};
pub use health::health_handler;
