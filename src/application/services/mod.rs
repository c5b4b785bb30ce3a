//! Business logic services for the application layer.

pub mod auth_service;
pub mod monitor_service;

pub use auth_service::AuthService;
pub use monitor_service::{MonitorService, PassReport, TargetFailure};
