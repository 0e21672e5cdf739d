use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use arena_core::{DomainError, DomainResult, PermissionId};

/// Permission identifier of the form `<resource>-<action>` (e.g. `"user-index"`).
///
/// Slugs are compared as exact, case-sensitive strings. The resolver accepts
/// plain `&str` queries so an unknown or malformed slug is still checkable;
/// `Slug::parse` is for callers that want the shape validated up front.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(Cow<'static, str>);

impl Slug {
    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        Self(value.into())
    }

    /// Parse a slug, requiring a non-empty resource and action around the first `-`.
    pub fn parse(value: &str) -> DomainResult<Self> {
        match value.split_once('-') {
            Some((resource, action)) if !resource.is_empty() && !action.is_empty() => {
                Ok(Self(Cow::Owned(value.to_string())))
            }
            _ => Err(DomainError::validation(format!(
                "permission slug '{value}' must look like '<resource>-<action>'"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resource segment (everything before the first `-`).
    pub fn resource(&self) -> &str {
        split_slug(self.as_str()).0
    }

    /// Action segment (everything after the first `-`, possibly empty).
    pub fn action(&self) -> &str {
        split_slug(self.as_str()).1
    }
}

impl core::fmt::Display for Slug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Split a slug on its first `-`. A slug without a dash is all resource.
pub(crate) fn split_slug(slug: &str) -> (&str, &str) {
    slug.split_once('-').unwrap_or((slug, ""))
}

/// Backend status flag for a permission record (`"0"` inactive, `"1"` active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PermissionStatus {
    #[serde(rename = "0")]
    Inactive,
    #[serde(rename = "1")]
    #[default]
    Active,
}

/// A permission as published by the backend catalog.
///
/// Read-only from this crate's point of view; the backend owns creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub id: PermissionId,
    pub slug: Slug,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: PermissionStatus,
}

impl PermissionRecord {
    pub fn new(id: u64, slug: impl Into<Cow<'static, str>>, display_name: impl Into<String>) -> Self {
        Self {
            id: PermissionId::new(id),
            slug: Slug::new(slug),
            display_name: display_name.into(),
            description: None,
            status: PermissionStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PermissionStatus::Active
    }
}
