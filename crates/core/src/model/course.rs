use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::{CourseId, SubtopicId, TopicId, UserId};

/// Cover image used when a new course is created without one.
pub const DEFAULT_COVER_IMAGE_URL: &str = "https://images.unsplash.com/photo-1635070041078-e363dbe005cb?q=80&w=2070&auto=format&fit=crop";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    MissingTitle,

    #[error("course description cannot be empty")]
    MissingDescription,

    #[error("cover image is not a valid url: {0}")]
    InvalidCoverImage(String),

    #[error("topic id {0} appears more than once")]
    DuplicateTopicId(TopicId),

    #[error("subtopic id {0} appears more than once")]
    DuplicateSubtopicId(SubtopicId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty: {raw}")]
pub struct ParseDifficultyError {
    raw: String,
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Persisted spelling (`BEGINNER`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "BEGINNER",
            Difficulty::Intermediate => "INTERMEDIATE",
            Difficulty::Advanced => "ADVANCED",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDifficultyError {
                raw: s.to_string(),
            })
    }
}

//
// ─── TREE ──────────────────────────────────────────────────────────────────────
//

/// A single lesson. Its id is the unit of progress tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
    id: SubtopicId,
    title: String,
    #[serde(default)]
    content: String,
}

impl Subtopic {
    #[must_use]
    pub fn new(id: impl Into<SubtopicId>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &SubtopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Markdown source of the lesson.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    id: TopicId,
    title: String,
    #[serde(default)]
    subtopics: Vec<Subtopic>,
}

impl Topic {
    #[must_use]
    pub fn new(id: impl Into<TopicId>, title: impl Into<String>, subtopics: Vec<Subtopic>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtopics,
        }
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtopics(&self) -> &[Subtopic] {
        &self.subtopics
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// Top-level learning unit: an ordered tree of topics and subtopics.
///
/// Courses are immutable once created. Build new ones through [`CourseDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    title: String,
    #[serde(default)]
    subtitle: String,
    description: String,
    difficulty: Difficulty,
    #[serde(default)]
    cover_image_url: String,
    #[serde(default)]
    learning_objectives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author_id: Option<UserId>,
    #[serde(default)]
    topics: Vec<Topic>,
}

impl Course {
    /// Trusted constructor for the built-in catalog; skips draft validation.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn seeded(
        id: &str,
        title: &str,
        subtitle: &str,
        description: &str,
        difficulty: Difficulty,
        cover_image_url: &str,
        learning_objectives: &[&str],
        author_id: Option<UserId>,
        topics: Vec<Topic>,
    ) -> Self {
        Self {
            id: CourseId::new(id),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            description: description.to_string(),
            difficulty,
            cover_image_url: cover_image_url.to_string(),
            learning_objectives: learning_objectives.iter().map(|o| (*o).to_string()).collect(),
            author_id,
            topics,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn cover_image_url(&self) -> &str {
        &self.cover_image_url
    }

    #[must_use]
    pub fn learning_objectives(&self) -> &[String] {
        &self.learning_objectives
    }

    #[must_use]
    pub fn author_id(&self) -> Option<UserId> {
        self.author_id
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id.as_str() == id)
    }

    /// Total number of lessons across every topic.
    #[must_use]
    pub fn subtopic_count(&self) -> usize {
        self.topics.iter().map(|t| t.subtopics.len()).sum()
    }

    /// Iterates subtopics in reading order.
    pub fn subtopics(&self) -> impl Iterator<Item = &Subtopic> {
        self.topics.iter().flat_map(|t| t.subtopics.iter())
    }

    #[must_use]
    pub fn contains_subtopic(&self, id: &str) -> bool {
        self.subtopics().any(|s| s.id.as_str() == id)
    }
}

/// User-supplied fields for a new course, validated before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub cover_image_url: Option<String>,
    pub learning_objectives: Vec<String>,
    pub author_id: Option<UserId>,
    pub topics: Vec<Topic>,
}

impl CourseDraft {
    /// Draft with the two required fields and the form defaults for the rest.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            description: description.into(),
            difficulty: Difficulty::Beginner,
            cover_image_url: None,
            learning_objectives: Vec::new(),
            author_id: None,
            topics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_learning_objectives(mut self, objectives: Vec<String>) -> Self {
        self.learning_objectives = objectives;
        self
    }

    #[must_use]
    pub fn with_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    #[must_use]
    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self
    }

    /// Validate the draft and turn it into a course with the given id.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if title or description is blank, the cover image
    /// is not an absolute url, or topic/subtopic ids repeat within the course.
    pub fn validate(self, id: CourseId) -> Result<Course, CourseError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CourseError::MissingTitle);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(CourseError::MissingDescription);
        }

        let cover_image_url = match self.cover_image_url.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_COVER_IMAGE_URL.to_string(),
            Some(raw) => Url::parse(raw)
                .map_err(|_| CourseError::InvalidCoverImage(raw.to_string()))?
                .to_string(),
        };

        let mut topic_ids = HashSet::new();
        let mut subtopic_ids = HashSet::new();
        for topic in &self.topics {
            if !topic_ids.insert(topic.id.as_str()) {
                return Err(CourseError::DuplicateTopicId(topic.id.clone()));
            }
            for subtopic in &topic.subtopics {
                if !subtopic_ids.insert(subtopic.id.as_str()) {
                    return Err(CourseError::DuplicateSubtopicId(subtopic.id.clone()));
                }
            }
        }

        Ok(Course {
            id,
            title: title.to_string(),
            subtitle: self.subtitle.trim().to_string(),
            description: description.to_string(),
            difficulty: self.difficulty,
            cover_image_url,
            learning_objectives: self
                .learning_objectives
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            author_id: self.author_id,
            topics: self.topics,
        })
    }
}
