use course_core::model::User;
use course_core::seed::default_users;

/// Read-only user list behind the admin screen.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Directory populated with the built-in users.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(default_users())
    }

    #[must_use]
    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// Users whose name or email contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&User> {
        self.users.iter().filter(|u| u.matches(query)).collect()
    }
}
