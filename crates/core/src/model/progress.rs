use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::course::Course;
use crate::model::ids::SubtopicId;

/// Global completion overlay keyed by subtopic id.
///
/// A missing key reads as "not complete". Keys are not checked against any
/// catalog, so entries for subtopics that no longer exist are carried along
/// and ignored by every read path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<SubtopicId, bool>);

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_complete(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Flip the flag for `id` and return the new value.
    pub fn toggle(&mut self, id: &SubtopicId) -> bool {
        let next = !self.is_complete(id.as_str());
        self.0.insert(id.clone(), next);
        next
    }

    pub fn set(&mut self, id: SubtopicId, complete: bool) {
        self.0.insert(id, complete);
    }

    /// Entries explicitly marked complete.
    pub fn completed_ids(&self) -> impl Iterator<Item = &SubtopicId> {
        self.0.iter().filter(|(_, done)| **done).map(|(id, _)| id)
    }

    /// Drop every key that is not a subtopic of one of `courses`.
    ///
    /// Returns the number of entries removed.
    pub fn retain_known(&mut self, courses: &[Course]) -> usize {
        let before = self.0.len();
        self.0
            .retain(|id, _| courses.iter().any(|c| c.contains_subtopic(id.as_str())));
        before - self.0.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SubtopicId, bool)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (SubtopicId, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
