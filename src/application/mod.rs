//! Application layer: the check pipeline and the loops that drive it.
//!
//! - [`services::monitor_service::MonitorService`] - Fetch, extract, compare, notify, store
//! - [`services::auth_service::AuthService`] - Static API key validation
//! - [`poller`] - The long-running poll loop

pub mod poller;
pub mod services;
