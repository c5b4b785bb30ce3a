//! JSON file backed count store.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::repositories::{CountRepository, StoreResult};

/// Persists counts as a flat `{ "url": count }` JSON object.
///
/// Reads and writes go to memory; [`CountRepository::flush`] rewrites the
/// file through a temporary sibling and a rename so a crash mid-write never
/// leaves a truncated file behind.
pub struct JsonFileCountRepository {
    path: PathBuf,
    counts: RwLock<BTreeMap<String, u64>>,
}

impl JsonFileCountRepository {
    /// Opens the store at `path`, loading existing counts.
    ///
    /// A missing file is treated as an empty store and created on first flush.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::repositories::StoreError::Io`] if the file
    /// exists but cannot be read, and
    /// [`crate::domain::repositories::StoreError::Format`] if it is not a
    /// valid count object.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let counts = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Count store {} does not exist yet", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            "Loaded {} stored count(s) from {}",
            counts.len(),
            path.display()
        );

        Ok(Self {
            path,
            counts: RwLock::new(counts),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CountRepository for JsonFileCountRepository {
    async fn get_previous(&self, url: &str) -> StoreResult<Option<u64>> {
        Ok(self.counts.read().await.get(url).copied())
    }

    async fn store(&self, url: &str, count: u64) -> StoreResult<()> {
        self.counts.write().await.insert(url.to_string(), count);
        Ok(())
    }

    async fn flush(&self) -> StoreResult<()> {
        let body = {
            let counts = self.counts.read().await;
            serde_json::to_vec_pretty(&*counts)?
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!("Flushed counts to {}", self.path.display());
        Ok(())
    }
}
