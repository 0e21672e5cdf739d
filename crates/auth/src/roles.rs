use serde::{Deserialize, Serialize};

use arena_core::RoleId;

use crate::PermissionRecord;

/// A role as embedded in the authenticated user payload.
///
/// `permissions` stays optional: the backend omits it for roles loaded
/// without their grants, and an absent list means "no permissions", not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: Option<Vec<PermissionRecord>>,
}

impl Role {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: RoleId::new(id),
            name: name.into(),
            permissions: None,
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<PermissionRecord>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Slugs granted by this role, in payload order (duplicates included).
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.permissions
            .iter()
            .flatten()
            .map(|p| p.slug.as_str())
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
