//! Domain layer containing listing entities and the rules applied to them.
//!
//! - [`entities`] - Targets, snapshots, observations and updates
//! - [`repositories`] - Count storage trait
//! - [`change_detector`] - The "did the count go up" rule
//!
//! # Check Flow
//!
//! 1. A [`crate::infrastructure::browser::PageFetcher`] renders the page into a [`entities::PageSnapshot`]
//! 2. [`crate::utils::count_extractor::extract_count`] parses the stats text
//! 3. The previous count is read from a [`repositories::CountRepository`]
//! 4. [`change_detector::is_increase`] decides whether to notify
//! 5. The new count is stored as the next baseline

pub mod change_detector;
pub mod entities;
pub mod repositories;
