#![forbid(unsafe_code)]

pub mod catalog;
pub mod completion;
pub mod model;
pub mod navigator;
pub mod seed;
pub mod time;

pub use catalog::{CourseFilter, filter_topics};
pub use completion::{CourseCompletion, completion_percentage, course_completion};
pub use navigator::{LessonPosition, first_lesson, locate, next_lesson, previous_lesson};
pub use time::Clock;
