//! Route permission map: normalized route template -> allow-list of slugs.
//!
//! The map is built once per catalog from the fixed set of dashboard route
//! templates. A template whose allow-list would be empty (none of its slugs
//! exist in the catalog) stays known but unmapped: it still claims its paths
//! during lookup, so `/users/create` never falls through to `/users/:id`, and
//! it denies like any other unmapped route.

use std::collections::HashMap;

use crate::PermissionCatalog;

/// A dashboard section backed by a CRUD resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRoutes {
    /// Slug resource segment (`center` in `center-index`).
    pub resource: &'static str,
    /// Base path of the section (`/centers`).
    pub base: &'static str,
}

/// Dashboard sections with the standard list/create/show/edit screens.
pub const KNOWN_RESOURCES: &[ResourceRoutes] = &[
    ResourceRoutes { resource: "center", base: "/centers" },
    ResourceRoutes { resource: "area", base: "/areas" },
    ResourceRoutes { resource: "sport", base: "/sports" },
    ResourceRoutes { resource: "amenity", base: "/amenities" },
    ResourceRoutes { resource: "media", base: "/media" },
    ResourceRoutes { resource: "user", base: "/users" },
    ResourceRoutes { resource: "role", base: "/roles" },
    ResourceRoutes { resource: "permission", base: "/permissions" },
];

/// Fixed route templates and the slugs that unlock each of them, before
/// filtering against the catalog.
pub fn known_templates() -> Vec<(String, Vec<String>)> {
    let dashboard = vec!["dashboard-index".to_string(), "dashboard-view".to_string()];
    let mut out = vec![
        ("/".to_string(), dashboard.clone()),
        ("/dashboard".to_string(), dashboard),
    ];

    for r in KNOWN_RESOURCES {
        let slug = |action: &str| format!("{}-{}", r.resource, action);
        out.push((r.base.to_string(), vec![slug("index")]));
        out.push((format!("{}/create", r.base), vec![slug("store")]));
        out.push((format!("{}/:id", r.base), vec![slug("show")]));
        out.push((format!("{}/:id/edit", r.base), vec![slug("update")]));
    }

    out.push((
        "/roles/:id/permissions".to_string(),
        vec!["role-getpermissions".to_string(), "role-syncpermissions".to_string()],
    ));

    out
}

/// Normalize a navigational path to template form.
///
/// Drops query string and fragment, collapses repeated and trailing slashes,
/// and replaces purely numeric segments with `:id`.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.bytes().all(|b| b.is_ascii_digit()) {
                ":id"
            } else {
                s
            }
        })
        .collect();

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
}

impl Segment {
    fn matches(&self, concrete: &str) -> bool {
        match self {
            Segment::Literal(lit) => lit == concrete,
            Segment::Param => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub template: String,
    pub slugs: Vec<String>,
    segments: Vec<Segment>,
}

impl RouteEntry {
    fn new(template: &str, slugs: Vec<String>) -> Self {
        let template = normalize_path(template);
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(_) => Segment::Param,
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self {
            template,
            slugs,
            segments,
        }
    }

    fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    fn matches(&self, concrete: &[&str]) -> bool {
        self.segments.len() == concrete.len()
            && self.segments.iter().zip(concrete).all(|(t, c)| t.matches(c))
    }
}

/// Allow-list resolved for a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub template: &'a str,
    pub slugs: Vec<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct RoutePermissionMap {
    entries: Vec<RouteEntry>,
    by_template: HashMap<String, usize>,
    catalog: PermissionCatalog,
}

impl RoutePermissionMap {
    /// Build the map from the fixed templates, keeping only slugs the catalog knows.
    pub fn build(catalog: &PermissionCatalog) -> Self {
        let templates = known_templates().into_iter().map(|(template, slugs)| {
            let slugs: Vec<String> = slugs.into_iter().filter(|s| catalog.exists(s)).collect();
            (template, slugs)
        });
        Self::from_entries(templates).with_catalog(catalog)
    }

    /// Build from explicit entries. Entries with an empty allow-list are kept
    /// as known templates that always deny; a repeated template replaces the
    /// earlier entry.
    pub fn from_entries<I, T, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, Vec<S>)>,
        T: AsRef<str>,
        S: Into<String>,
    {
        let mut map = Self::default();
        for (template, slugs) in entries {
            let slugs: Vec<String> = slugs.into_iter().map(Into::into).collect();
            let entry = RouteEntry::new(template.as_ref(), slugs);
            match map.by_template.get(&entry.template) {
                Some(&idx) => map.entries[idx] = entry,
                None => {
                    map.by_template.insert(entry.template.clone(), map.entries.len());
                    map.entries.push(entry);
                }
            }
        }
        map
    }

    /// Attach the catalog used by explicit-pattern lookups.
    pub fn with_catalog(mut self, catalog: &PermissionCatalog) -> Self {
        self.catalog = catalog.clone();
        self
    }

    /// Mapped entries (non-empty allow-list), in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter().filter(|e| !e.slugs.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Find the mapped entry for a concrete path.
    ///
    /// An exact template match wins; otherwise the matching template with the
    /// most literal segments wins, earlier entries breaking ties. Matching
    /// runs over every known template, so a path claimed by a template with
    /// an empty allow-list is unmapped.
    pub fn lookup(&self, route_path: &str) -> Option<&RouteEntry> {
        let normalized = normalize_path(route_path);
        let best = match self.by_template.get(&normalized) {
            Some(&idx) => self.entries.get(idx),
            None => {
                let concrete: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
                let mut best: Option<&RouteEntry> = None;
                for entry in self.entries.iter().filter(|e| e.matches(&concrete)) {
                    if best.is_none_or(|b| entry.literal_count() > b.literal_count()) {
                        best = Some(entry);
                    }
                }
                best
            }
        };
        best.filter(|e| !e.slugs.is_empty())
    }

    /// Resolve the allow-list for a path. With `explicit_pattern`, the list is
    /// every catalog slug starting with the pattern; the route itself must
    /// still be mapped. A blank pattern counts as absent.
    pub fn resolve(&self, route_path: &str, explicit_pattern: Option<&str>) -> Option<ResolvedRoute<'_>> {
        let entry = self.lookup(route_path)?;
        let pattern = explicit_pattern.map(str::trim).filter(|p| !p.is_empty());
        let slugs = match pattern {
            Some(pattern) => self.catalog.slugs_with_prefix(pattern),
            None => entry.slugs.iter().map(String::as_str).collect(),
        };
        Some(ResolvedRoute {
            template: &entry.template,
            slugs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PermissionRecord;

    fn full_catalog() -> PermissionCatalog {
        let mut records = Vec::new();
        let mut id = 0;
        for (_, slugs) in known_templates() {
            for slug in slugs {
                if !records.iter().any(|p: &PermissionRecord| p.slug.as_str() == slug) {
                    id += 1;
                    records.push(PermissionRecord::new(id, slug.clone(), slug));
                }
            }
        }
        PermissionCatalog::new(records)
    }

    #[test]
    fn normalizes_paths() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("//centers///"), "/centers");
        assert_eq!(normalize_path("/centers/12/edit?tab=media#top"), "/centers/:id/edit");
        assert_eq!(normalize_path("centers/12"), "/centers/:id");
        assert_eq!(normalize_path("/media/abc12"), "/media/abc12");
    }

    #[test]
    fn literal_segments_beat_params() {
        let routes = RoutePermissionMap::build(&full_catalog());
        let entry = routes.lookup("/users/create").unwrap();
        assert_eq!(entry.template, "/users/create");
        assert_eq!(entry.slugs, vec!["user-store"]);

        let entry = routes.lookup("/users/7").unwrap();
        assert_eq!(entry.template, "/users/:id");
    }

    #[test]
    fn params_match_non_numeric_segments() {
        let routes = RoutePermissionMap::build(&full_catalog());
        let entry = routes.lookup("/media/hero-banner/edit").unwrap();
        assert_eq!(entry.template, "/media/:id/edit");
        assert_eq!(entry.slugs, vec!["media-update"]);
    }

    #[test]
    fn role_permission_screen_accepts_either_slug() {
        let routes = RoutePermissionMap::build(&full_catalog());
        let entry = routes.lookup("/roles/3/permissions").unwrap();
        assert_eq!(entry.slugs, vec!["role-getpermissions", "role-syncpermissions"]);
    }

    #[test]
    fn templates_without_catalog_slugs_are_dropped() {
        let catalog = PermissionCatalog::new(vec![
            PermissionRecord::new(1, "center-index", "List centers"),
            PermissionRecord::new(2, "dashboard-view", "Dashboard"),
        ]);
        let routes = RoutePermissionMap::build(&catalog);
        assert_eq!(routes.len(), 3);
        assert!(routes.lookup("/centers").is_some());
        assert!(routes.lookup("/centers/1").is_none());
        assert_eq!(routes.lookup("/").unwrap().slugs, vec!["dashboard-view"]);
        assert!(routes.entries().all(|e| !e.slugs.is_empty()));
    }

    #[test]
    fn dropped_literal_template_does_not_fall_back_to_param() {
        let catalog = PermissionCatalog::new(vec![
            PermissionRecord::new(1, "user-index", "List users"),
            PermissionRecord::new(2, "user-show", "Show user"),
        ]);
        let routes = RoutePermissionMap::build(&catalog);
        assert!(routes.lookup("/users/create").is_none());
        assert!(routes.resolve("/users/create", None).is_none());
        assert_eq!(routes.lookup("/users/4").unwrap().template, "/users/:id");
        assert!(routes.lookup("/users/4/edit").is_none());
    }

    #[test]
    fn blank_pattern_falls_back_to_mapped_entry() {
        let catalog = PermissionCatalog::new(vec![
            PermissionRecord::new(1, "dashboard-index", "Dashboard"),
            PermissionRecord::new(2, "user-index", "List users"),
        ]);
        let routes = RoutePermissionMap::build(&catalog);
        for pattern in ["", "  "] {
            let resolved = routes.resolve("/users", Some(pattern)).unwrap();
            assert_eq!(resolved.slugs, vec!["user-index"]);
        }
    }

    #[test]
    fn from_entries_keeps_empty_as_denied_and_replaces_duplicates() {
        let routes = RoutePermissionMap::from_entries(vec![
            ("/reports", vec!["report-index"]),
            ("/empty", Vec::new()),
            ("/reports/", vec!["report-view"]),
        ]);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes.lookup("/reports").unwrap().slugs, vec!["report-view"]);
        assert!(routes.lookup("/empty").is_none());
    }

    #[test]
    fn explicit_pattern_needs_catalog() {
        let catalog = PermissionCatalog::new(vec![
            PermissionRecord::new(1, "center-index", "List centers"),
            PermissionRecord::new(2, "center-show", "Show center"),
        ]);
        let routes = RoutePermissionMap::from_entries(vec![("/centers", vec!["center-index"])]);
        let resolved = routes.resolve("/centers", Some("center-")).unwrap();
        assert!(resolved.slugs.is_empty());

        let routes = routes.with_catalog(&catalog);
        let resolved = routes.resolve("/centers", Some("center-")).unwrap();
        assert_eq!(resolved.slugs, vec!["center-index", "center-show"]);
    }
}
