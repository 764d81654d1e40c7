use std::sync::Arc;

use storage::repository::{KeyValueStore, Storage};

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::user_directory::UserDirectory;
use crate::viewer_service::ViewerService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    viewer: Arc<ViewerService>,
    users: Arc<UserDirectory>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// The catalog is read once so an empty database is seeded up front.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or seeding fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let services = Self::from_storage(&storage, clock);
        services.catalog.list().await?;
        Ok(services)
    }

    /// Build services over an in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let records: Arc<dyn KeyValueStore> = Arc::clone(&storage.records);
        let catalog = Arc::new(CatalogService::new(clock, Arc::clone(&records)));
        let progress = Arc::new(ProgressService::new(records));
        let viewer = Arc::new(ViewerService::new(
            Arc::clone(&catalog),
            Arc::clone(&progress),
        ));

        Self {
            catalog,
            progress,
            viewer,
            users: Arc::new(UserDirectory::seeded()),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn viewer(&self) -> Arc<ViewerService> {
        Arc::clone(&self.viewer)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserDirectory> {
        Arc::clone(&self.users)
    }
}
