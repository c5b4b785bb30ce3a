//! Infrastructure layer for external integrations.
//!
//! This layer implements the seams the pipeline depends on:
//!
//! - [`browser`] - Headless Chromium page fetching
//! - [`notify`] - Push notification back ends (ntfy, Pushover)
//! - [`persistence`] - Count stores (memory, no-op, JSON file)

pub mod browser;
pub mod notify;
pub mod persistence;
