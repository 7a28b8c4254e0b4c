use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::plans::types::GrocerySuggestion;

/// Durable favorites collection. Append-only from the core's point of view;
/// repeated promotion of the same snapshot appends duplicates by design.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn append(&self, suggestion: GrocerySuggestion) -> anyhow::Result<()>;
    async fn list_all(&self) -> anyhow::Result<Vec<GrocerySuggestion>>;
}

/// Favorites persisted as a JSON document on disk, cached in memory and
/// rewritten wholesale on every append. Mutation is serialized by the lock.
pub struct JsonFileFavorites {
    path: PathBuf,
    entries: RwLock<Vec<GrocerySuggestion>>,
}

impl JsonFileFavorites {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parse favorites file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("read favorites file {}", path.display()))
            }
        };
        debug!(path = %path.display(), count = entries.len(), "loaded favorites");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    async fn persist(&self, entries: &[GrocerySuggestion]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(entries).context("serialize favorites")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("write favorites file {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl FavoritesStore for JsonFileFavorites {
    async fn append(&self, suggestion: GrocerySuggestion) -> anyhow::Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(suggestion);
        self.persist(&entries).await
    }

    async fn list_all(&self) -> anyhow::Result<Vec<GrocerySuggestion>> {
        Ok(self.entries.read().await.clone())
    }
}

/// Non-durable store for tests and the fake app state.
#[derive(Default)]
pub struct InMemoryFavorites {
    entries: RwLock<Vec<GrocerySuggestion>>,
}

#[async_trait]
impl FavoritesStore for InMemoryFavorites {
    async fn append(&self, suggestion: GrocerySuggestion) -> anyhow::Result<()> {
        self.entries.write().await.push(suggestion);
        Ok(())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<GrocerySuggestion>> {
        Ok(self.entries.read().await.clone())
    }
}
