//! Count store implementations of [`crate::domain::repositories::CountRepository`].
//!
//! - [`MemoryCountRepository`] - In-process map, lives as long as the poll loop
//! - [`NullCountRepository`] - Remembers nothing; every check is a baseline
//! - [`JsonFileCountRepository`] - Opt-in JSON file, survives restarts

mod json_file_count_repository;
mod memory_count_repository;
mod null_count_repository;

pub use json_file_count_repository::JsonFileCountRepository;
pub use memory_count_repository::MemoryCountRepository;
pub use null_count_repository::NullCountRepository;
