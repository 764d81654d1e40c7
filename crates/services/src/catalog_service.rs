use std::sync::Arc;

use course_core::model::{Course, CourseDraft, CourseId};
use course_core::seed::default_catalog;
use course_core::{Clock, CourseFilter};
use storage::records::{self, Decoded};
use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};

use crate::error::CatalogError;

/// Reads and appends to the persisted course collection.
#[derive(Clone)]
pub struct CatalogService {
    clock: Clock,
    records: Arc<dyn KeyValueStore>,
}

impl CatalogService {
    #[must_use]
    pub fn new(clock: Clock, records: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, records }
    }

    /// All courses in stored order.
    ///
    /// The first read of an empty store writes the default catalog. Malformed
    /// stored content yields the default catalog without touching the store.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the backend cannot be read or written.
    pub async fn list(&self) -> Result<Vec<Course>, CatalogError> {
        match records::load_courses(self.records.as_ref()).await? {
            Decoded::Value(courses) => Ok(courses),
            Decoded::Missing => {
                let seed = default_catalog();
                info!(courses = seed.len(), "seeding default catalog");
                records::save_courses(self.records.as_ref(), &seed).await?;
                Ok(seed)
            }
            Decoded::Malformed(reason) => {
                warn!(%reason, "falling back to default catalog");
                Ok(default_catalog())
            }
        }
    }

    /// First course with the given id, if any.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the backend cannot be read.
    pub async fn get(&self, id: &str) -> Result<Option<Course>, CatalogError> {
        let courses = self.list().await?;
        Ok(courses.into_iter().find(|c| c.id().as_str() == id))
    }

    /// Append `course` to the collection.
    ///
    /// Ids are not checked for collisions; a second course with an existing
    /// id is stored alongside the first and `get` keeps returning the first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the backend cannot be read or written.
    pub async fn add(&self, course: Course) -> Result<(), CatalogError> {
        let mut courses = self.list().await?;
        debug!(course_id = %course.id(), "appending course");
        courses.push(course);
        records::save_courses(self.records.as_ref(), &courses).await?;
        Ok(())
    }

    /// Validate `draft`, assign it a time-based id and append it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Course` if validation fails; nothing is written.
    /// Returns `CatalogError::Storage` if persistence fails.
    pub async fn create(&self, draft: CourseDraft) -> Result<Course, CatalogError> {
        let id = CourseId::new(format!("course-{}", self.clock.unix_millis()));
        let course = draft.validate(id)?;
        self.add(course.clone()).await?;
        info!(course_id = %course.id(), title = course.title(), "created course");
        Ok(course)
    }

    /// Courses matching `filter`, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the backend cannot be read.
    pub async fn search(&self, filter: &CourseFilter) -> Result<Vec<Course>, CatalogError> {
        let courses = self.list().await?;
        Ok(courses.into_iter().filter(|c| filter.matches(c)).collect())
    }

    /// Restore the default catalog and erase all progress.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the backend cannot be written.
    pub async fn reset(&self) -> Result<(), CatalogError> {
        records::save_courses(self.records.as_ref(), &default_catalog()).await?;
        records::clear_progress(self.records.as_ref()).await?;
        info!("catalog and progress reset");
        Ok(())
    }
}
