use std::sync::Arc;

use course_core::model::{Course, ProgressMap, SubtopicId};
use storage::records::{self, Decoded};
use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};

use crate::error::ProgressError;

/// Global lesson completion, persisted as one flat record.
///
/// Every mutation is a read-modify-write of the whole map. There is no
/// locking, so two writers racing on the same store keep whichever map was
/// written last.
#[derive(Clone)]
pub struct ProgressService {
    records: Arc<dyn KeyValueStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(records: Arc<dyn KeyValueStore>) -> Self {
        Self { records }
    }

    /// The persisted map, or an empty one if nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` only if the backend cannot be read.
    pub async fn load(&self) -> Result<ProgressMap, ProgressError> {
        match records::load_progress(self.records.as_ref()).await? {
            Decoded::Value(progress) => Ok(progress),
            Decoded::Missing => Ok(ProgressMap::new()),
            Decoded::Malformed(reason) => {
                warn!(%reason, "ignoring unreadable progress record");
                Ok(ProgressMap::new())
            }
        }
    }

    /// Flip completion for `id`, persist the full map and return it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the backend cannot be read or written.
    pub async fn toggle(&self, id: &SubtopicId) -> Result<ProgressMap, ProgressError> {
        let mut progress = self.load().await?;
        let complete = progress.toggle(id);
        records::save_progress(self.records.as_ref(), &progress).await?;
        debug!(subtopic_id = %id, complete, "toggled progress");
        Ok(progress)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the backend cannot be read.
    pub async fn is_complete(&self, id: &str) -> Result<bool, ProgressError> {
        Ok(self.load().await?.is_complete(id))
    }

    /// Drop every entry whose id is not a subtopic of `courses`.
    ///
    /// Returns how many entries were removed; the record is only rewritten
    /// when something changed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the backend cannot be read or written.
    pub async fn prune_stale(&self, courses: &[Course]) -> Result<usize, ProgressError> {
        let mut progress = self.load().await?;
        let removed = progress.retain_known(courses);
        if removed > 0 {
            records::save_progress(self.records.as_ref(), &progress).await?;
            info!(removed, "pruned stale progress entries");
        }
        Ok(removed)
    }

    /// Erase all progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the backend cannot be written.
    pub async fn reset(&self) -> Result<(), ProgressError> {
        records::clear_progress(self.records.as_ref()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use course_core::seed::default_catalog;
    use storage::PROGRESS_KEY;
    use storage::repository::{InMemoryStore, StorageError};

    fn service(store: &InMemoryStore) -> ProgressService {
        ProgressService::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn load_on_empty_store_is_empty_map() {
        let progress = service(&InMemoryStore::new()).load().await.unwrap();
        assert!(progress.is_empty());
    }

    #[tokio::test]
    async fn corrupt_record_loads_as_empty_map() {
        let store = InMemoryStore::new();
        store.set(PROGRESS_KEY, "not-json").await.unwrap();
        let progress = service(&store).load().await.unwrap();
        assert!(progress.is_empty());
    }

    #[tokio::test]
    async fn toggle_persists_and_returns_updated_map() {
        let store = InMemoryStore::new();
        let svc = service(&store);
        let id = SubtopicId::new("a");

        let returned = svc.toggle(&id).await.unwrap();
        assert!(returned.is_complete("a"));
        assert_eq!(svc.load().await.unwrap(), returned);
        assert_eq!(
            store.get(PROGRESS_KEY).await.unwrap().as_deref(),
            Some(r#"{"a":true}"#)
        );
    }

    #[tokio::test]
    async fn double_toggle_restores_state() {
        let svc = service(&InMemoryStore::new());
        let id = SubtopicId::new("a");
        let before = svc.is_complete("a").await.unwrap();
        svc.toggle(&id).await.unwrap();
        let after = svc.toggle(&id).await.unwrap();
        assert_eq!(after.is_complete("a"), before);
    }

    #[tokio::test]
    async fn toggle_over_corrupt_record_starts_fresh() {
        let store = InMemoryStore::new();
        store.set(PROGRESS_KEY, "{{{").await.unwrap();
        let after = service(&store).toggle(&SubtopicId::new("b")).await.unwrap();
        assert_eq!(after.len(), 1);
        assert!(after.is_complete("b"));
    }

    #[tokio::test]
    async fn prune_removes_only_unknown_ids() {
        let store = InMemoryStore::new();
        let svc = service(&store);
        svc.toggle(&SubtopicId::new("rf-ownership-moves")).await.unwrap();
        svc.toggle(&SubtopicId::new("deleted-lesson")).await.unwrap();

        assert_eq!(svc.prune_stale(&default_catalog()).await.unwrap(), 1);
        let progress = svc.load().await.unwrap();
        assert!(progress.is_complete("rf-ownership-moves"));
        assert_eq!(progress.len(), 1);
        assert_eq!(svc.prune_stale(&default_catalog()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn reset_erases_record() {
        let store = InMemoryStore::new();
        let svc = service(&store);
        svc.toggle(&SubtopicId::new("a")).await.unwrap();
        svc.reset().await.unwrap();
        assert_eq!(store.get(PROGRESS_KEY).await.unwrap(), None);
    }

    struct UnreachableStore;

    #[async_trait]
    impl KeyValueStore for UnreachableStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    #[tokio::test]
    async fn backend_failures_propagate() {
        let svc = ProgressService::new(Arc::new(UnreachableStore));
        let err = svc.load().await.unwrap_err();
        assert!(matches!(err, ProgressError::Storage(StorageError::Connection(_))));
    }
}
