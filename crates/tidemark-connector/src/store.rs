//! Offset persistence boundary
//!
//! The engine itself performs no I/O; the surrounding system durably commits
//! offsets through an [`OffsetStore`] once the records they correspond to are
//! committed downstream. An offset commit must never become visible before
//! its records (at-least-once, never ahead-of-delivery) — that ordering is
//! the caller's responsibility, this trait only defines the storage contract.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::SourceResult;
use crate::state::SourcePartition;

/// Durable key-value storage for per-source offsets.
#[async_trait]
pub trait OffsetStore: Send + Sync {
    /// Load the previously committed offset for a source partition.
    ///
    /// Returns `Ok(None)` when the source has never committed an offset.
    async fn load(&self, partition: &SourcePartition) -> SourceResult<Option<String>>;

    /// Durably commit an offset for a source partition.
    ///
    /// `None` records "pagination exhausted; resume from the base request".
    async fn save(&self, partition: &SourcePartition, offset: Option<&str>) -> SourceResult<()>;

    /// Remove all state for a source partition.
    ///
    /// Used only when the source is permanently removed from configuration.
    async fn remove(&self, partition: &SourcePartition) -> SourceResult<()>;
}

/// In-memory offset store.
///
/// Suitable for tests and for embedding callers that handle durability
/// elsewhere. Not durable across restarts.
#[derive(Debug, Default)]
pub struct InMemoryOffsetStore {
    offsets: RwLock<HashMap<SourcePartition, Option<String>>>,
}

impl InMemoryOffsetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of partitions with a committed entry.
    pub async fn len(&self) -> usize {
        self.offsets.read().await.len()
    }

    /// Check whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.offsets.read().await.is_empty()
    }
}

#[async_trait]
impl OffsetStore for InMemoryOffsetStore {
    async fn load(&self, partition: &SourcePartition) -> SourceResult<Option<String>> {
        Ok(self
            .offsets
            .read()
            .await
            .get(partition)
            .cloned()
            .flatten())
    }

    async fn save(&self, partition: &SourcePartition, offset: Option<&str>) -> SourceResult<()> {
        debug!(partition = %partition, offset = ?offset, "Committing offset");
        self.offsets
            .write()
            .await
            .insert(partition.clone(), offset.map(String::from));
        Ok(())
    }

    async fn remove(&self, partition: &SourcePartition) -> SourceResult<()> {
        self.offsets.write().await.remove(partition);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_partition() {
        let store = InMemoryOffsetStore::new();
        let partition = SourcePartition::new("https://api.example.com/items");
        assert_eq!(store.load(&partition).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = InMemoryOffsetStore::new();
        let partition = SourcePartition::new("https://api.example.com/items");

        store.save(&partition, Some("cursor-17")).await.unwrap();
        assert_eq!(
            store.load(&partition).await.unwrap(),
            Some("cursor-17".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_none_records_exhaustion() {
        let store = InMemoryOffsetStore::new();
        let partition = SourcePartition::new("https://api.example.com/items");

        store.save(&partition, Some("cursor-17")).await.unwrap();
        store.save(&partition, None).await.unwrap();

        // The entry exists but carries no offset: resume from base request.
        assert_eq!(store.load(&partition).await.unwrap(), None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_partition() {
        let store = InMemoryOffsetStore::new();
        let partition = SourcePartition::new("https://api.example.com/items");

        store.save(&partition, Some("x")).await.unwrap();
        store.remove(&partition).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_partitions_are_independent() {
        let store = InMemoryOffsetStore::new();
        let users = SourcePartition::new("https://api.example.com/users");
        let groups = SourcePartition::new("https://api.example.com/groups");

        store.save(&users, Some("u-9")).await.unwrap();
        store.save(&groups, Some("g-3")).await.unwrap();

        assert_eq!(store.load(&users).await.unwrap(), Some("u-9".to_string()));
        assert_eq!(store.load(&groups).await.unwrap(), Some("g-3".to_string()));
    }
}
