//! User identities referenced by assignments.
//!
//! The workflow engine never owns the user directory; it only carries
//! opaque identifiers and validates them through an `IdentityResolver`
//! at the engine boundary.

use serde::{Deserialize, Serialize};

/// Unique identifier for a user in the directory
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Reserved identity for engine-internal transitions (e.g. the
    /// overdue sweep), which have no human actor.
    pub fn system() -> Self {
        Self("system".to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved directory entry for an assignee, assigner, or actor
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id() {
        let id = UserId::generate();
        assert!(!id.0.is_empty());

        let named = UserId::new("u-1");
        assert_eq!(format!("{}", named), "u-1");
        assert_eq!(UserId::system(), UserId::new("system"));
    }

    #[test]
    fn test_user_builder() {
        let user = User::new(UserId::new("u-1"), "Alex").with_email("alex@example.com");
        assert_eq!(user.display_name, "Alex");
        assert!(user.email.is_some());
    }
}
