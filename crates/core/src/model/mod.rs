mod course;
mod ids;
mod progress;
mod user;

pub use ids::{CourseId, SubtopicId, TopicId, UserId};

pub use course::{
    Course, CourseDraft, CourseError, DEFAULT_COVER_IMAGE_URL, Difficulty, ParseDifficultyError,
    Subtopic, Topic,
};
pub use progress::ProgressMap;
pub use user::{User, UserRole};
