//! Headless browser page fetching.
//!
//! Provides a [`PageFetcher`] trait with one production implementation:
//! - [`ChromeFetcher`] - Launches a headless Chromium per fetch via the DevTools protocol

mod chrome;
mod service;

pub use chrome::{BrowserSettings, ChromeFetcher};
pub use service::{FetchError, FetchResult, PageFetcher};

#[cfg(test)]
pub use service::MockPageFetcher;
