//! Permission catalog: the full list of permissions known to the backend.
//!
//! Catalog queries are independent of any user's grants. `permission_exists`
//! answers "is this a real permission", not "does this user hold it".

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::permissions::split_slug;
use crate::PermissionRecord;

/// Every catalog entry whose slug contains `pattern` (case-sensitive), in
/// catalog order.
pub fn permissions_by_pattern<'a>(
    catalog: &'a [PermissionRecord],
    pattern: &str,
) -> Vec<&'a PermissionRecord> {
    catalog
        .iter()
        .filter(|p| p.slug.as_str().contains(pattern))
        .collect()
}

/// `true` iff some catalog entry's slug equals `slug` exactly.
pub fn permission_exists(catalog: &[PermissionRecord], slug: &str) -> bool {
    catalog.iter().any(|p| p.slug.as_str() == slug)
}

/// Owned snapshot of the backend catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionCatalog {
    records: Vec<PermissionRecord>,
}

impl PermissionCatalog {
    pub fn new(records: Vec<PermissionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PermissionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_pattern(&self, pattern: &str) -> Vec<&PermissionRecord> {
        permissions_by_pattern(&self.records, pattern)
    }

    pub fn exists(&self, slug: &str) -> bool {
        permission_exists(&self.records, slug)
    }

    /// Slugs starting with `prefix`, in catalog order.
    pub fn slugs_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.records
            .iter()
            .map(|p| p.slug.as_str())
            .filter(|s| s.starts_with(prefix))
            .collect()
    }

    /// Records with status `"1"`.
    pub fn active(&self) -> impl Iterator<Item = &PermissionRecord> {
        self.records.iter().filter(|p| p.is_active())
    }

    /// Records grouped by slug resource, resources in lexical order and
    /// records in catalog order within each group.
    pub fn grouped_by_resource(&self) -> BTreeMap<&str, Vec<&PermissionRecord>> {
        let mut groups: BTreeMap<&str, Vec<&PermissionRecord>> = BTreeMap::new();
        for record in &self.records {
            let (resource, _) = split_slug(record.slug.as_str());
            groups.entry(resource).or_default().push(record);
        }
        groups
    }
}

impl From<Vec<PermissionRecord>> for PermissionCatalog {
    fn from(records: Vec<PermissionRecord>) -> Self {
        Self::new(records)
    }
}

/// What the catalog fetcher currently knows.
///
/// Answers computed while `is_loading` is set are not authoritative; a failed
/// refresh keeps the previous catalog and records the error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogSnapshot {
    pub catalog: PermissionCatalog,
    pub is_loading: bool,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    /// Initial state before the first fetch completes.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn loaded(catalog: PermissionCatalog, at: DateTime<Utc>) -> Self {
        Self {
            catalog,
            is_loading: false,
            error: None,
            fetched_at: Some(at),
        }
    }

    /// Record a failed refresh; the last good catalog is kept.
    pub fn failed(&mut self, error: impl Into<String>) {
        self.is_loading = false;
        self.error = Some(error.into());
    }

    pub fn is_authoritative(&self) -> bool {
        !self.is_loading && self.fetched_at.is_some()
    }
}
