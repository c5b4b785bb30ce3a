//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod count_repository;

pub use count_repository::{CountRepository, StoreError, StoreResult};

#[cfg(test)]
pub use count_repository::MockCountRepository;
