use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ids::{CourseId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Instructor,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Student => "Student",
            UserRole::Instructor => "Instructor",
            UserRole::Admin => "Admin",
        };
        f.write_str(label)
    }
}

/// Directory entry shown in the admin user list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
    #[serde(default)]
    enrolled_courses: Vec<CourseId>,
    /// Completion fraction per enrolled course, in `0.0..=1.0`.
    #[serde(default)]
    course_progress: BTreeMap<CourseId, f32>,
    #[serde(default)]
    authored_courses: Vec<CourseId>,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            enrolled_courses: Vec::new(),
            course_progress: BTreeMap::new(),
            authored_courses: Vec::new(),
        }
    }

    /// Enroll in a course with the given completion fraction (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn enrolled(mut self, course: impl Into<CourseId>, fraction: f32) -> Self {
        let course = course.into();
        self.course_progress
            .insert(course.clone(), fraction.clamp(0.0, 1.0));
        self.enrolled_courses.push(course);
        self
    }

    #[must_use]
    pub fn authored(mut self, course: impl Into<CourseId>) -> Self {
        self.authored_courses.push(course.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    #[must_use]
    pub fn enrolled_courses(&self) -> &[CourseId] {
        &self.enrolled_courses
    }

    #[must_use]
    pub fn course_progress(&self) -> &BTreeMap<CourseId, f32> {
        &self.course_progress
    }

    #[must_use]
    pub fn authored_courses(&self) -> &[CourseId] {
        &self.authored_courses
    }

    /// Case-insensitive substring match on name or email.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.email.to_lowercase().contains(&needle)
    }
}
