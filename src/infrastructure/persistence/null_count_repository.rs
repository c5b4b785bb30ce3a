//! No-op count store.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::repositories::{CountRepository, StoreResult};

/// A count store that never remembers anything.
///
/// With this store every check is a baseline observation, so no change is
/// ever reported. It is the HTTP mode default: each request is independent
/// unless a persistent store is configured explicitly.
pub struct NullCountRepository;

impl NullCountRepository {
    pub fn new() -> Self {
        debug!("Using NullCountRepository (counts are not persisted)");
        Self
    }
}

impl Default for NullCountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CountRepository for NullCountRepository {
    async fn get_previous(&self, _url: &str) -> StoreResult<Option<u64>> {
        Ok(None)
    }

    async fn store(&self, _url: &str, _count: u64) -> StoreResult<()> {
        Ok(())
    }

    async fn flush(&self) -> StoreResult<()> {
        Ok(())
    }
}
