//! Linear lesson order over a course's topic → subtopic tree.
//!
//! Reading order is topics in stored order, and within each topic its
//! subtopics in stored order. Every function here is pure and answers `None`
//! for positions that are not in the tree.

use serde::{Deserialize, Serialize};

use crate::model::{Subtopic, SubtopicId, Topic, TopicId};

/// A lesson address inside one course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPosition {
    pub topic_id: TopicId,
    pub subtopic_id: SubtopicId,
}

impl LessonPosition {
    #[must_use]
    pub fn new(topic_id: impl Into<TopicId>, subtopic_id: impl Into<SubtopicId>) -> Self {
        Self {
            topic_id: topic_id.into(),
            subtopic_id: subtopic_id.into(),
        }
    }

    fn of(topic: &Topic, subtopic: &Subtopic) -> Self {
        Self {
            topic_id: topic.id().clone(),
            subtopic_id: subtopic.id().clone(),
        }
    }
}

fn indices(topics: &[Topic], position: &LessonPosition) -> Option<(usize, usize)> {
    let topic_idx = topics
        .iter()
        .position(|t| t.id() == &position.topic_id)?;
    let sub_idx = topics[topic_idx]
        .subtopics()
        .iter()
        .position(|s| s.id() == &position.subtopic_id)?;
    Some((topic_idx, sub_idx))
}

/// Resolve a position to its topic and subtopic.
#[must_use]
pub fn locate<'a>(topics: &'a [Topic], position: &LessonPosition) -> Option<(&'a Topic, &'a Subtopic)> {
    let (topic_idx, sub_idx) = indices(topics, position)?;
    let topic = &topics[topic_idx];
    Some((topic, &topic.subtopics()[sub_idx]))
}

/// First subtopic of the first topic.
///
/// `None` when there are no topics or the first topic has no subtopics.
#[must_use]
pub fn first_lesson(topics: &[Topic]) -> Option<LessonPosition> {
    let topic = topics.first()?;
    let subtopic = topic.subtopics().first()?;
    Some(LessonPosition::of(topic, subtopic))
}

/// The lesson after `position`.
///
/// Moves within the topic first, then to the first subtopic of the following
/// topic. An empty following topic ends the sequence; later topics are not
/// searched.
#[must_use]
pub fn next_lesson(topics: &[Topic], position: &LessonPosition) -> Option<LessonPosition> {
    let (topic_idx, sub_idx) = indices(topics, position)?;
    let topic = &topics[topic_idx];

    if let Some(subtopic) = topic.subtopics().get(sub_idx + 1) {
        return Some(LessonPosition::of(topic, subtopic));
    }

    let next_topic = topics.get(topic_idx + 1)?;
    let first = next_topic.subtopics().first()?;
    Some(LessonPosition::of(next_topic, first))
}

/// The lesson before `position`.
///
/// Mirror of [`next_lesson`]: an empty preceding topic ends the sequence.
#[must_use]
pub fn previous_lesson(topics: &[Topic], position: &LessonPosition) -> Option<LessonPosition> {
    let (topic_idx, sub_idx) = indices(topics, position)?;
    let topic = &topics[topic_idx];

    if sub_idx > 0 {
        return Some(LessonPosition::of(topic, &topic.subtopics()[sub_idx - 1]));
    }

    let prev_topic = topics.get(topic_idx.checked_sub(1)?)?;
    let last = prev_topic.subtopics().last()?;
    Some(LessonPosition::of(prev_topic, last))
}
