//! User Entity
//!
//! The canonical signed-in user. Everything above the provider adapter sees
//! this shape and nothing else.

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

/// User entity
///
/// Immutable for the lifetime of a session; a different identity means a
/// different `User` value, never a mutated one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-assigned opaque identifier
    pub id: UserId,
    /// Email address (empty when the provider has none on record)
    pub email: String,
    /// Display name from provider metadata (empty when absent)
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
        }
    }

    /// Name shown in the sidebar
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Admin User"
        } else {
            &self.name
        }
    }

    /// Single-character avatar initial
    pub fn initial(&self) -> char {
        self.name.trim().chars().next().unwrap_or('A')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back() {
        let user = User::new("u1", "a@b.com", "");
        assert_eq!(user.display_name(), "Admin User");
        assert_eq!(user.initial(), 'A');
    }

    #[test]
    fn test_display_name_and_initial() {
        let user = User::new("u1", "a@b.com", "Ann");
        assert_eq!(user.display_name(), "Ann");
        assert_eq!(user.initial(), 'A');

        let user = User::new("u2", "z@b.com", "émile");
        assert_eq!(user.initial(), 'é');
    }
}
