//! Identity-directory seam.
//!
//! User accounts live in an external identity service; the only question
//! this core ever asks it is whether a username is already taken, so that
//! registration cannot silently shadow an existing account. Account
//! creation, password verification, and user lookup all stay on the other
//! side of this trait.

use std::collections::HashSet;
use std::sync::Mutex;

pub trait UserDirectory: Send + Sync {
    fn user_exists(&self, username: &str) -> bool;
}

/// In-memory directory for tests and single-process deployments.
#[derive(Default)]
pub struct MemoryUserDirectory {
    users: Mutex<HashSet<String>>,
}

impl MemoryUserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a username as taken.
    ///
    /// # Panics
    /// Panics if the directory lock is poisoned.
    pub fn add_user(&self, username: &str) {
        let mut users = self.users.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        users.insert(username.to_string());
    }
}

impl UserDirectory for MemoryUserDirectory {
    fn user_exists(&self, username: &str) -> bool {
        let users = self.users.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        users.contains(username)
    }
}
