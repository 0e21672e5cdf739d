//! Sidebar navigation filtered by route access.

use serde::Serialize;

use crate::naming::generate_constant_name;
use crate::resolver::can_access_route;
use crate::{RoutePermissionMap, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub path: &'static str,
    /// Slug whose constant name keys the entry.
    pub slug: &'static str,
}

pub const MENU: &[MenuEntry] = &[
    MenuEntry { label: "Dashboard", path: "/dashboard", slug: "dashboard-index" },
    MenuEntry { label: "Centers", path: "/centers", slug: "center-index" },
    MenuEntry { label: "Areas", path: "/areas", slug: "area-index" },
    MenuEntry { label: "Sports", path: "/sports", slug: "sport-index" },
    MenuEntry { label: "Amenities", path: "/amenities", slug: "amenity-index" },
    MenuEntry { label: "Media", path: "/media", slug: "media-index" },
    MenuEntry { label: "Users", path: "/users", slug: "user-index" },
    MenuEntry { label: "Roles", path: "/roles", slug: "role-index" },
    MenuEntry { label: "Permissions", path: "/permissions", slug: "permission-index" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub key: String,
    pub label: &'static str,
    pub path: &'static str,
}

/// Menu entries whose path the user can reach, in menu order.
pub fn visible_entries(user: Option<&User>, routes: &RoutePermissionMap) -> Vec<MenuItem> {
    MENU.iter()
        .filter(|e| can_access_route(user, routes, e.path, None))
        .map(|e| MenuItem {
            key: generate_constant_name(e.slug),
            label: e.label,
            path: e.path,
        })
        .collect()
}
