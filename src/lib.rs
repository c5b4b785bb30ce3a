//! # Listing Monitor
//!
//! Watches product-listing counts on shop pages and pushes a notification
//! when a count grows. Pages are rendered in headless Chromium because the
//! counts are filled in by client-side JavaScript.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Listing entities, change detection, count store trait
//! - **Application Layer** ([`application`]) - The check pipeline and the poll loop
//! - **Infrastructure Layer** ([`infrastructure`]) - Browser, push notifiers, count stores
//! - **API Layer** ([`api`]) - The on-demand check endpoint, DTOs, and middleware
//!
//! ## Run Modes
//!
//! - `watch` (default) - check every target, sleep, repeat
//! - `serve` - `GET /api/check` runs one pass per request (`X-API-Key` required)
//! - `check` - one pass printed as a table
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: override the watched pages
//! export TARGET_URLS="https://www.grailed.com/shop/nxzCtqQtfg"
//!
//! # Poll forever, notifying through ntfy.sh/automonitor
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, MonitorService, PassReport};
    pub use crate::domain::entities::{ListingTarget, ListingUpdate, PageSnapshot};
    pub use crate::domain::repositories::CountRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::browser::{FetchError, PageFetcher};
    pub use crate::infrastructure::notify::{NotifyError, Notifier};
    pub use crate::state::AppState;
}
