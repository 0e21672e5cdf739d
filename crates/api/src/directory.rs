//! Auth collaborator: resolves a bearer token to the current user.

use std::{collections::HashMap, path::Path};

use serde::Deserialize;
use thiserror::Error;

use arena_auth::User;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read user seed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid user seed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of the authenticated user for a request.
pub trait UserDirectory: Send + Sync {
    /// `None` for unknown tokens; the caller treats that as "no permissions".
    fn user_for_token(&self, token: &str) -> Option<User>;
}

#[derive(Debug, Deserialize)]
struct SeedEntry {
    token: String,
    user: User,
}

/// Token → user map held in memory (dev/test).
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserDirectory {
    users: HashMap<String, User>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, user: User) {
        self.users.insert(token.into(), user);
    }

    pub fn with_user(mut self, token: impl Into<String>, user: User) -> Self {
        self.insert(token, user);
        self
    }

    /// Parse a JSON array of `{"token": ..., "user": {...}}` entries.
    pub fn from_json(raw: &str) -> Result<Self, DirectoryError> {
        let entries: Vec<SeedEntry> = serde_json::from_str(raw)?;
        let users = entries.into_iter().map(|e| (e.token, e.user)).collect();
        Ok(Self { users })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn user_for_token(&self, token: &str) -> Option<User> {
        self.users.get(token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_file_contents() {
        let dir = InMemoryUserDirectory::from_json(
            r#"[
                {"token": "t-admin", "user": {"id": 1, "name": "Admin", "role": {"id": 1, "name": "admin", "permissions": [
                    {"id": 1, "slug": "user-index", "display_name": "Users", "status": "1"}
                ]}}},
                {"token": "t-guest", "user": {"id": 2, "name": "Guest", "role": null}}
            ]"#,
        )
        .unwrap();

        assert_eq!(dir.len(), 2);
        let admin = dir.user_for_token("t-admin").unwrap();
        assert_eq!(admin.slugs().collect::<Vec<_>>(), vec!["user-index"]);
        assert!(dir.user_for_token("t-guest").unwrap().role.is_none());
        assert!(dir.user_for_token("unknown").is_none());
    }

    #[test]
    fn rejects_malformed_seed() {
        assert!(matches!(
            InMemoryUserDirectory::from_json("{\"token\": 1}"),
            Err(DirectoryError::Json(_))
        ));
    }
}
