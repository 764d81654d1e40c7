//! Per-course completion derived from the global progress map.

use serde::Serialize;

use crate::model::{Course, ProgressMap};

/// Completed lessons out of the course total, with the rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CourseCompletion {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

impl CourseCompletion {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Count the course's lessons and how many of them are marked complete.
///
/// Only `true` entries whose key is a subtopic of `course` are counted;
/// entries from other courses and stale ids are ignored.
#[must_use]
pub fn course_completion(course: &Course, progress: &ProgressMap) -> CourseCompletion {
    let total = course.subtopic_count();
    let completed = progress
        .completed_ids()
        .filter(|id| course.contains_subtopic(id.as_str()))
        .count();

    CourseCompletion {
        completed,
        total,
        percent: percent_rounded(completed, total),
    }
}

/// `round(completed / total * 100)`, halves rounding up; `0` for an empty course.
#[must_use]
pub fn completion_percentage(course: &Course, progress: &ProgressMap) -> u8 {
    course_completion(course, progress).percent
}

fn percent_rounded(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    let rounded = (completed * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseDraft, CourseId, Subtopic, SubtopicId, Topic};

    fn course(id: &str, layout: &[(&str, &[&str])]) -> Course {
        let topics = layout
            .iter()
            .map(|(t, subs)| {
                Topic::new(
                    *t,
                    *t,
                    subs.iter().map(|s| Subtopic::new(*s, *s, "")).collect(),
                )
            })
            .collect();
        CourseDraft::new("Title", "Desc")
            .with_topics(topics)
            .validate(CourseId::new(id))
            .unwrap()
    }

    fn done(ids: &[&str]) -> ProgressMap {
        ids.iter().map(|id| (SubtopicId::new(*id), true)).collect()
    }

    #[test]
    fn empty_course_is_zero_percent() {
        let c = course("c", &[("t1", &[])]);
        let summary = course_completion(&c, &done(&["a"]));
        assert_eq!(summary.total, 0);
        assert_eq!(summary.percent, 0);
        assert!(!summary.is_finished());
    }

    #[test]
    fn denominator_is_sum_of_subtopics() {
        let c = course("c", &[("t1", &["a", "b"]), ("t2", &[]), ("t3", &["c"])]);
        assert_eq!(course_completion(&c, &ProgressMap::new()).total, 3);
    }

    #[test]
    fn rounds_to_nearest_whole_percent() {
        let c = course("c", &[("t1", &["a", "b", "c"])]);
        assert_eq!(completion_percentage(&c, &done(&["a"])), 33);
        assert_eq!(completion_percentage(&c, &done(&["a", "b"])), 67);
        assert_eq!(completion_percentage(&c, &done(&["a", "b", "c"])), 100);

        let eight = course("e", &[("t1", &["1", "2", "3", "4", "5", "6", "7", "8"])]);
        // 1/8 = 12.5 rounds up
        assert_eq!(completion_percentage(&eight, &done(&["1"])), 13);
    }

    #[test]
    fn ignores_entries_from_other_courses() {
        let c = course("c", &[("t1", &["a", "b"])]);
        let progress = done(&["a", "other-course-lesson", "stale"]);
        let summary = course_completion(&c, &progress);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.percent, 50);
    }

    #[test]
    fn false_entries_do_not_count() {
        let c = course("c", &[("t1", &["a", "b"])]);
        let mut progress = done(&["a"]);
        progress.set(SubtopicId::new("b"), false);
        assert_eq!(completion_percentage(&c, &progress), 50);
    }

    #[test]
    fn completing_more_lessons_never_lowers_percentage() {
        let ids = ["a", "b", "c", "d", "e", "f", "g"];
        let c = course("c", &[("t1", &ids[..4]), ("t2", &ids[4..])]);
        let mut progress = ProgressMap::new();
        let mut last = completion_percentage(&c, &progress);
        for id in ids {
            progress.set(SubtopicId::new(id), true);
            let now = completion_percentage(&c, &progress);
            assert!(now >= last, "{now} < {last} after completing {id}");
            last = now;
        }
        assert_eq!(last, 100);
        assert!(course_completion(&c, &progress).is_finished());
    }
}
