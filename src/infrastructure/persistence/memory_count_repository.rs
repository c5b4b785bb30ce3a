//! In-memory count store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::{CountRepository, StoreResult};

/// Keeps the last count per URL for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryCountRepository {
    counts: RwLock<HashMap<String, u64>>,
}

impl MemoryCountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with known counts.
    pub fn with_counts(counts: HashMap<String, u64>) -> Self {
        Self {
            counts: RwLock::new(counts),
        }
    }

    /// Returns a copy of every stored count.
    pub async fn snapshot(&self) -> HashMap<String, u64> {
        self.counts.read().await.clone()
    }
}

#[async_trait]
impl CountRepository for MemoryCountRepository {
    async fn get_previous(&self, url: &str) -> StoreResult<Option<u64>> {
        Ok(self.counts.read().await.get(url).copied())
    }

    async fn store(&self, url: &str, count: u64) -> StoreResult<()> {
        self.counts.write().await.insert(url.to_string(), count);
        Ok(())
    }

    async fn flush(&self) -> StoreResult<()> {
        Ok(())
    }
}
