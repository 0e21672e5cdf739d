//! Human-readable keys for permission slugs (`user-index` -> `USERS_VIEW`).
//!
//! Used for navigation-menu and route-map keys only; access decisions never
//! look at these names.

use crate::permissions::split_slug;

fn action_suffix(action: &str) -> String {
    match action {
        "index" => "VIEW".to_string(),
        "show" => "SHOW".to_string(),
        "store" => "CREATE".to_string(),
        "update" => "EDIT".to_string(),
        "destroy" => "DELETE".to_string(),
        "view" => "VIEW_ROUTE".to_string(),
        "getpermissions" => "GET_PERMISSIONS".to_string(),
        "syncpermissions" => "SYNC_PERMISSIONS".to_string(),
        other => other.to_uppercase(),
    }
}

fn pluralize_upper(resource: &str) -> String {
    let upper = resource.to_uppercase();
    if resource.ends_with('s') || resource.ends_with('S') {
        upper
    } else {
        format!("{upper}S")
    }
}

/// Derive the display constant for a slug.
///
/// The resource (text before the first `-`) is pluralized and uppercased,
/// the action goes through a fixed suffix table. `dashboard` is kept
/// singular. Total over any input: a slug without an action yields the
/// resource part alone.
pub fn generate_constant_name(slug: &str) -> String {
    let (resource, action) = split_slug(slug);

    if resource == "dashboard" {
        return match action {
            "index" => "DASHBOARD_VIEW".to_string(),
            "view" => "DASHBOARD_VIEW_ROUTE".to_string(),
            "" => "DASHBOARD".to_string(),
            other => format!("DASHBOARD_{}", action_suffix(other)),
        };
    }

    let resource = pluralize_upper(resource);
    if action.is_empty() {
        return resource;
    }
    format!("{resource}_{}", action_suffix(action))
}
