//! JSON encoding of the two persisted records.
//!
//! `courses` holds the ordered course list, `progress` the flat
//! subtopic-id → bool map. Decoding never fails on bad content: callers get
//! [`Decoded::Malformed`] and choose their own fallback.

use course_core::model::{Course, ProgressMap};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::repository::{KeyValueStore, StorageError};

pub const COURSES_KEY: &str = "courses";
pub const PROGRESS_KEY: &str = "progress";

/// Outcome of reading one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// Nothing stored under the key.
    Missing,
    /// Stored content did not parse; carries the parser message.
    Malformed(String),
    Value(T),
}

impl<T> Decoded<T> {
    /// The decoded value, treating missing and malformed alike.
    pub fn into_option(self) -> Option<T> {
        match self {
            Decoded::Value(value) => Some(value),
            Decoded::Missing | Decoded::Malformed(_) => None,
        }
    }

    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Decoded::Malformed(_))
    }
}

async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Decoded<T>, StorageError> {
    let Some(raw) = store.get(key).await? else {
        debug!(key, "record missing");
        return Ok(Decoded::Missing);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Decoded::Value(value)),
        Err(err) => {
            warn!(key, error = %err, "persisted record is malformed");
            Ok(Decoded::Malformed(err.to_string()))
        }
    }
}

async fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw =
        serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    debug!(key, bytes = raw.len(), "writing record");
    store.set(key, &raw).await
}

/// Read the persisted course list.
///
/// # Errors
///
/// Returns `StorageError` only if the backend read fails.
pub async fn load_courses(store: &dyn KeyValueStore) -> Result<Decoded<Vec<Course>>, StorageError> {
    load(store, COURSES_KEY).await
}

/// Replace the persisted course list.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the backend write fails.
pub async fn save_courses(store: &dyn KeyValueStore, courses: &[Course]) -> Result<(), StorageError> {
    save(store, COURSES_KEY, courses).await
}

/// Read the persisted progress map.
///
/// # Errors
///
/// Returns `StorageError` only if the backend read fails.
pub async fn load_progress(store: &dyn KeyValueStore) -> Result<Decoded<ProgressMap>, StorageError> {
    load(store, PROGRESS_KEY).await
}

/// Replace the persisted progress map.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the backend write fails.
pub async fn save_progress(
    store: &dyn KeyValueStore,
    progress: &ProgressMap,
) -> Result<(), StorageError> {
    save(store, PROGRESS_KEY, progress).await
}

/// Delete the progress record entirely.
///
/// # Errors
///
/// Returns `StorageError` if the backend write fails.
pub async fn clear_progress(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    debug!(key = PROGRESS_KEY, "removing record");
    store.remove(PROGRESS_KEY).await
}
