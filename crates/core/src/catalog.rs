//! Search helpers for the course list and the lesson sidebar.

use crate::model::{Course, Difficulty, Topic};

/// Course list filter: free-text query plus an optional difficulty level.
///
/// The default filter matches every course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub query: String,
    pub difficulty: Option<Difficulty>,
}

impl CourseFilter {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            difficulty: None,
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Title or description contains the query (ignoring case) and the
    /// difficulty matches when one is set.
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        let needle = self.query.to_lowercase();
        let text_match = course.title().to_lowercase().contains(&needle)
            || course.description().to_lowercase().contains(&needle);
        let level_match = self
            .difficulty
            .is_none_or(|level| course.difficulty() == level);
        text_match && level_match
    }

    pub fn apply<'a>(&'a self, courses: &'a [Course]) -> impl Iterator<Item = &'a Course> + 'a {
        courses.iter().filter(move |c| self.matches(c))
    }
}

/// Topics whose title, or any of whose subtopic titles, contains `query`.
#[must_use]
pub fn filter_topics<'a>(course: &'a Course, query: &str) -> Vec<&'a Topic> {
    let needle = query.to_lowercase();
    course
        .topics()
        .iter()
        .filter(|t| {
            t.title().to_lowercase().contains(&needle)
                || t
                    .subtopics()
                    .iter()
                    .any(|s| s.title().to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseDraft, CourseId, Subtopic};

    fn course(id: &str, title: &str, description: &str, difficulty: Difficulty) -> Course {
        CourseDraft::new(title, description)
            .with_difficulty(difficulty)
            .with_topics(vec![
                Topic::new(
                    "t1",
                    "Ownership",
                    vec![Subtopic::new("s1", "Borrowing rules", "")],
                ),
                Topic::new("t2", "Traits", vec![Subtopic::new("s2", "Generics", "")]),
            ])
            .validate(CourseId::new(id))
            .unwrap()
    }

    fn catalog() -> Vec<Course> {
        vec![
            course("a", "Rust Basics", "Start here", Difficulty::Beginner),
            course("b", "Async Deep Dive", "Futures and executors in Rust", Difficulty::Advanced),
            course("c", "Go Basics", "Goroutines", Difficulty::Beginner),
        ]
    }

    fn ids<'a>(it: impl Iterator<Item = &'a Course>) -> Vec<&'a str> {
        it.map(|c| c.id().as_str()).collect()
    }

    #[test]
    fn default_filter_matches_everything() {
        let courses = catalog();
        assert_eq!(ids(CourseFilter::default().apply(&courses)), ["a", "b", "c"]);
    }

    #[test]
    fn query_matches_title_or_description_ignoring_case() {
        let courses = catalog();
        assert_eq!(ids(CourseFilter::new("RUST").apply(&courses)), ["a", "b"]);
        assert_eq!(ids(CourseFilter::new("goroutines").apply(&courses)), ["c"]);
    }

    #[test]
    fn difficulty_narrows_results() {
        let courses = catalog();
        let filter = CourseFilter::new("basics").with_difficulty(Difficulty::Beginner);
        assert_eq!(ids(filter.apply(&courses)), ["a", "c"]);
        let filter = CourseFilter::default().with_difficulty(Difficulty::Intermediate);
        assert!(filter.apply(&courses).next().is_none());
    }

    #[test]
    fn topic_filter_checks_subtopic_titles() {
        let c = course("a", "Rust", "Desc", Difficulty::Beginner);
        let hits: Vec<_> = filter_topics(&c, "generic").into_iter().map(|t| t.id().as_str()).collect();
        assert_eq!(hits, ["t2"]);
        assert_eq!(filter_topics(&c, "").len(), 2);
        assert!(filter_topics(&c, "macros").is_empty());
    }
}
