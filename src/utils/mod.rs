//! Pure helper functions used across the application.
//!
//! - [`count_extractor`] - Listing count parsing from stats text
//! - [`mask`] - Secret masking for log output

pub mod count_extractor;
pub mod mask;
