//! Core domain entities.
//!
//! Entities are plain data structures describing what is watched and what a
//! pass observed:
//!
//! - [`ListingTarget`] - A watched page URL
//! - [`PageSnapshot`] - Raw texts read from the rendered page
//! - [`ListingObservation`] - A parsed listing count with its search term
//! - [`ListingUpdate`] - The per-target outcome of a pass

pub mod listing;

pub use listing::{ListingObservation, ListingTarget, ListingUpdate, PageSnapshot};
