use std::sync::Arc;

use course_core::model::{Course, ProgressMap, Subtopic, Topic};
use course_core::{
    CourseCompletion, LessonPosition, course_completion, first_lesson, locate, next_lesson,
    previous_lesson,
};
use serde::Serialize;

use crate::catalog_service::CatalogService;
use crate::error::ViewerError;
use crate::progress_service::ProgressService;

/// Everything the lesson page shows for one course at one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseView {
    pub course: Course,
    /// Requested or defaulted position; may point outside the course.
    pub position: Option<LessonPosition>,
    pub previous: Option<LessonPosition>,
    pub next: Option<LessonPosition>,
    pub current_complete: bool,
    pub completion: CourseCompletion,
}

impl CourseView {
    /// Derive the view from a course, an optional position and the progress map.
    ///
    /// Without a position the first lesson is selected.
    #[must_use]
    pub fn build(course: Course, position: Option<LessonPosition>, progress: &ProgressMap) -> Self {
        let position = position.or_else(|| first_lesson(course.topics()));
        let (previous, next, current_complete) = match &position {
            Some(p) => (
                previous_lesson(course.topics(), p),
                next_lesson(course.topics(), p),
                locate(course.topics(), p)
                    .is_some_and(|(_, s)| progress.is_complete(s.id().as_str())),
            ),
            None => (None, None, false),
        };
        let completion = course_completion(&course, progress);

        Self {
            course,
            position,
            previous,
            next,
            current_complete,
            completion,
        }
    }

    /// The topic and lesson at `position`, when it exists in the course.
    #[must_use]
    pub fn current(&self) -> Option<(&Topic, &Subtopic)> {
        self.position
            .as_ref()
            .and_then(|p| locate(self.course.topics(), p))
    }
}

/// Composes catalog, progress and navigation for the lesson page.
#[derive(Clone)]
pub struct ViewerService {
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
}

impl ViewerService {
    #[must_use]
    pub fn new(catalog: Arc<CatalogService>, progress: Arc<ProgressService>) -> Self {
        Self { catalog, progress }
    }

    /// Open `course_id` at `position`, or at its first lesson.
    ///
    /// Returns `Ok(None)` when the course does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError` if the backend cannot be read.
    pub async fn open(
        &self,
        course_id: &str,
        position: Option<LessonPosition>,
    ) -> Result<Option<CourseView>, ViewerError> {
        let Some(course) = self.catalog.get(course_id).await? else {
            return Ok(None);
        };
        let progress = self.progress.load().await?;
        Ok(Some(CourseView::build(course, position, &progress)))
    }

    /// Toggle the lesson the view points at and return the refreshed view.
    ///
    /// A view without a resolvable current lesson is rebuilt without writing.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError` if the backend cannot be read or written.
    pub async fn toggle_current(&self, view: &CourseView) -> Result<CourseView, ViewerError> {
        let progress = match view.current() {
            Some((_, subtopic)) => self.progress.toggle(subtopic.id()).await?,
            None => self.progress.load().await?,
        };
        Ok(CourseView::build(
            view.course.clone(),
            view.position.clone(),
            &progress,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use course_core::model::{CourseDraft, CourseId, SubtopicId};
    use course_core::time::fixed_clock;
    use storage::repository::{InMemoryStore, KeyValueStore};

    fn two_topic_course() -> Course {
        CourseDraft::new("Course", "Desc")
            .with_topics(vec![
                Topic::new(
                    "t1",
                    "One",
                    vec![Subtopic::new("a", "A", "# A"), Subtopic::new("b", "B", "# B")],
                ),
                Topic::new("t2", "Two", vec![Subtopic::new("c", "C", "# C")]),
            ])
            .validate(CourseId::new("c1"))
            .unwrap()
    }

    fn viewer(store: &InMemoryStore) -> ViewerService {
        let records: Arc<dyn KeyValueStore> = Arc::new(store.clone());
        ViewerService::new(
            Arc::new(CatalogService::new(fixed_clock(), Arc::clone(&records))),
            Arc::new(ProgressService::new(records)),
        )
    }

    #[test]
    fn build_defaults_to_first_lesson() {
        let view = CourseView::build(two_topic_course(), None, &ProgressMap::new());
        assert_eq!(view.position, Some(LessonPosition::new("t1", "a")));
        assert_eq!(view.previous, None);
        assert_eq!(view.next, Some(LessonPosition::new("t1", "b")));
        assert_eq!(view.current().unwrap().1.content(), "# A");
    }

    #[test]
    fn build_at_topic_boundary() {
        let mut progress = ProgressMap::new();
        progress.set(SubtopicId::new("b"), true);
        let view = CourseView::build(
            two_topic_course(),
            Some(LessonPosition::new("t1", "b")),
            &progress,
        );
        assert_eq!(view.next, Some(LessonPosition::new("t2", "c")));
        assert_eq!(view.previous, Some(LessonPosition::new("t1", "a")));
        assert!(view.current_complete);
        assert_eq!(view.completion.percent, 33);
    }

    #[test]
    fn unknown_position_has_no_neighbours() {
        let view = CourseView::build(
            two_topic_course(),
            Some(LessonPosition::new("t1", "zzz")),
            &ProgressMap::new(),
        );
        assert!(view.current().is_none());
        assert_eq!(view.previous, None);
        assert_eq!(view.next, None);
        assert!(!view.current_complete);
    }

    #[tokio::test]
    async fn open_unknown_course_is_none() {
        let svc = viewer(&InMemoryStore::new());
        assert!(svc.open("missing", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn toggle_current_updates_completion() {
        let store = InMemoryStore::new();
        let svc = viewer(&store);
        let view = svc
            .open("rust-foundations", None)
            .await
            .unwrap()
            .expect("seeded course");
        assert_eq!(view.completion.completed, 0);

        let toggled = svc.toggle_current(&view).await.unwrap();
        assert!(toggled.current_complete);
        assert_eq!(toggled.completion.completed, 1);
        assert_eq!(toggled.completion.percent, 25);

        let untoggled = svc.toggle_current(&toggled).await.unwrap();
        assert!(!untoggled.current_complete);
        assert_eq!(untoggled.completion.completed, 0);
    }
}
