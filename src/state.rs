use std::sync::Arc;

use crate::application::services::{AuthService, MonitorService};

/// Shared state injected into every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub monitor_service: Arc<MonitorService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(monitor_service: Arc<MonitorService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            monitor_service,
            auth_service,
        }
    }
}
