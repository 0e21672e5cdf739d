//! Authenticated user snapshot and its derived grant set.
//!
//! The user arrives from the auth collaborator as JSON; the grant set is a
//! projection of `user.role.permissions[].slug` and has no identity of its
//! own. Rebuild it whenever the user (or their role) changes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use arena_core::UserId;

use crate::Role;

/// The current dashboard user, as returned by the backend's `me` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            email: String::new(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Slugs granted through the user's role. Empty when the role or its
    /// permission list is missing.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.role.iter().flat_map(|r| r.slugs())
    }
}

/// Hash-set projection of a user's granted slugs.
///
/// Same semantics as the free functions in [`crate::resolver`], with O(1)
/// membership. Empty requirement lists are denied here too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantSet {
    slugs: HashSet<String>,
}

impl GrantSet {
    pub fn from_user(user: Option<&User>) -> Self {
        let slugs = user
            .map(|u| u.slugs().map(str::to_string).collect())
            .unwrap_or_default();
        Self { slugs }
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    pub fn has_any<S: AsRef<str>>(&self, slugs: &[S]) -> bool {
        !slugs.is_empty() && slugs.iter().any(|s| self.contains(s.as_ref()))
    }

    pub fn has_all<S: AsRef<str>>(&self, slugs: &[S]) -> bool {
        !slugs.is_empty() && slugs.iter().all(|s| self.contains(s.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    /// Granted slugs in lexical order (for display and audit output).
    pub fn sorted(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.slugs.iter().map(String::as_str).collect();
        out.sort_unstable();
        out
    }
}

impl<'a> From<Option<&'a User>> for GrantSet {
    fn from(user: Option<&'a User>) -> Self {
        Self::from_user(user)
    }
}
