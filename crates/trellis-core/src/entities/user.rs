//! User entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
///
/// Credentials live only as an Argon2 hash in the persistence layer,
/// never on the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the username
    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Update the avatar
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }

    /// Get the avatar URL if set
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_ref()
            .map(|hash| format!("/avatars/{}/{}.png", self.id, hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(
            Snowflake::new(1),
            "sam".to_string(),
            "sam@example.com".to_string(),
        );
        assert_eq!(user.username, "sam");
        assert!(user.avatar.is_none());
    }

    #[test]
    fn test_avatar_url() {
        let mut user = User::new(
            Snowflake::new(5),
            "sam".to_string(),
            "sam@example.com".to_string(),
        );
        assert!(user.avatar_url().is_none());

        user.set_avatar(Some("abc".to_string()));
        assert_eq!(user.avatar_url(), Some("/avatars/5/abc.png".to_string()));
    }
}
