//! Permission resolver: pure decisions over a user snapshot.
//!
//! - No IO
//! - No panics
//! - Missing data (no user, no role, no permission list) resolves to `false`
//!
//! Requirement lists must be non-empty to grant anything: `has_any_permission`
//! and `has_all_permissions` both deny an empty list.

use crate::{RoutePermissionMap, User};

/// `true` iff the user's role carries a permission whose slug equals `slug`
/// exactly (case-sensitive).
pub fn has_permission(user: Option<&User>, slug: &str) -> bool {
    let Some(role) = user.and_then(|u| u.role.as_ref()) else {
        return false;
    };
    let Some(permissions) = role.permissions.as_deref() else {
        return false;
    };
    permissions.iter().any(|p| p.slug.as_str() == slug)
}

/// `true` iff `slugs` is non-empty and the user holds at least one of them.
pub fn has_any_permission<S: AsRef<str>>(user: Option<&User>, slugs: &[S]) -> bool {
    !slugs.is_empty() && slugs.iter().any(|s| has_permission(user, s.as_ref()))
}

/// `true` iff `slugs` is non-empty and the user holds every one of them.
pub fn has_all_permissions<S: AsRef<str>>(user: Option<&User>, slugs: &[S]) -> bool {
    !slugs.is_empty() && slugs.iter().all(|s| has_permission(user, s.as_ref()))
}

/// Decide whether the user may reach `route_path`.
///
/// The path is normalized and looked up in `routes`; an unmapped route is
/// denied. When `explicit_pattern` is given, the allow-list becomes every
/// catalog slug starting with that pattern instead of the mapped entry; a
/// blank pattern counts as absent.
pub fn can_access_route(
    user: Option<&User>,
    routes: &RoutePermissionMap,
    route_path: &str,
    explicit_pattern: Option<&str>,
) -> bool {
    let Some(resolved) = routes.resolve(route_path, explicit_pattern) else {
        tracing::debug!(route = route_path, "route not mapped; denying");
        return false;
    };

    let granted = has_any_permission(user, &resolved.slugs);
    tracing::debug!(
        route = route_path,
        template = resolved.template,
        granted,
        "route access decision"
    );
    granted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PermissionCatalog, PermissionRecord, Role};

    fn user_with(slugs: &[&str]) -> User {
        let perms = slugs
            .iter()
            .enumerate()
            .map(|(i, s)| PermissionRecord::new(i as u64 + 1, s.to_string(), s.to_string()))
            .collect();
        User::new(1, "Alice").with_role(Role::new(1, "staff").with_permissions(perms))
    }

    fn catalog() -> PermissionCatalog {
        let slugs = [
            "dashboard-index",
            "center-index",
            "center-show",
            "center-store",
            "center-update",
            "center-destroy",
            "role-index",
            "role-getpermissions",
            "role-syncpermissions",
        ];
        PermissionCatalog::new(
            slugs
                .iter()
                .enumerate()
                .map(|(i, s)| PermissionRecord::new(i as u64 + 1, *s, *s))
                .collect(),
        )
    }

    #[test]
    fn missing_user_role_or_list_denies() {
        assert!(!has_permission(None, "user-index"));

        let no_role = User::new(1, "Nobody");
        assert!(!has_permission(Some(&no_role), "user-index"));

        let no_list = User::new(2, "Empty").with_role(Role::new(1, "ghost"));
        assert!(!has_permission(Some(&no_list), "user-index"));
    }

    #[test]
    fn slug_match_is_exact_and_case_sensitive() {
        let user = user_with(&["user-index"]);
        assert!(has_permission(Some(&user), "user-index"));
        assert!(!has_permission(Some(&user), "User-Index"));
        assert!(!has_permission(Some(&user), "user-ind"));
        assert!(!has_permission(Some(&user), "user-index "));
    }

    #[test]
    fn empty_requirement_lists_are_denied() {
        let user = user_with(&["user-index"]);
        let none: [&str; 0] = [];
        assert!(!has_any_permission(Some(&user), &none));
        assert!(!has_all_permissions(Some(&user), &none));
    }

    #[test]
    fn center_permissions_end_to_end() {
        let user = user_with(&["center-show", "center-update"]);
        let user = Some(&user);

        assert!(!has_permission(user, "center-destroy"));
        assert!(has_any_permission(user, &["center-show", "center-destroy"]));
        assert!(has_all_permissions(user, &["center-show", "center-update"]));
        assert!(!has_all_permissions(user, &["center-show", "center-destroy"]));
    }

    #[test]
    fn route_access_follows_mapped_allow_list() {
        let routes = RoutePermissionMap::build(&catalog());
        let user = user_with(&["center-show"]);
        let user = Some(&user);

        assert!(can_access_route(user, &routes, "/centers/12", None));
        assert!(!can_access_route(user, &routes, "/centers/12/edit", None));
        assert!(!can_access_route(user, &routes, "/centers", None));
    }

    #[test]
    fn unmapped_routes_are_denied() {
        let routes = RoutePermissionMap::build(&catalog());
        let admin = user_with(&["center-index", "center-show", "dashboard-index"]);
        assert!(!can_access_route(Some(&admin), &routes, "/reports", None));
        assert!(!can_access_route(Some(&admin), &routes, "/centers/12/archive", None));
    }

    #[test]
    fn explicit_pattern_overrides_mapped_entry() {
        let routes = RoutePermissionMap::build(&catalog());
        let user = user_with(&["role-syncpermissions"]);
        let user = Some(&user);

        // mapped entry for /roles is role-index only
        assert!(!can_access_route(user, &routes, "/roles", None));
        assert!(can_access_route(user, &routes, "/roles", Some("role-")));
        assert!(!can_access_route(user, &routes, "/roles", Some("center-")));
        assert!(!can_access_route(user, &routes, "/roles", Some("nothing-")));
    }

    #[test]
    fn empty_catalog_denies_every_route() {
        let routes = RoutePermissionMap::build(&PermissionCatalog::default());
        let user = user_with(&["center-index", "dashboard-index"]);
        assert!(!can_access_route(Some(&user), &routes, "/centers", None));
        assert!(!can_access_route(Some(&user), &routes, "/dashboard", None));
    }

    #[test]
    fn create_screen_denied_when_store_slug_missing_from_catalog() {
        let catalog = PermissionCatalog::new(vec![
            PermissionRecord::new(1, "user-index", "List users"),
            PermissionRecord::new(2, "user-show", "Show user"),
        ]);
        let routes = RoutePermissionMap::build(&catalog);
        let user = user_with(&["user-show"]);

        assert!(can_access_route(Some(&user), &routes, "/users/8", None));
        assert!(!can_access_route(Some(&user), &routes, "/users/create", None));
    }

    #[test]
    fn blank_pattern_does_not_widen_allow_list() {
        let routes = RoutePermissionMap::build(&catalog());
        let user = user_with(&["dashboard-index"]);
        assert!(!can_access_route(Some(&user), &routes, "/centers", Some("")));
        assert!(!can_access_route(Some(&user), &routes, "/roles", Some(" ")));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn slug() -> impl Strategy<Value = String> {
            "[a-z]{1,6}-[a-z]{1,6}"
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: no user means no permission, for any slug.
            #[test]
            fn missing_user_never_has_permission(s in ".*") {
                prop_assert!(!has_permission(None, &s));
            }

            /// Property: an empty grant list holds nothing.
            #[test]
            fn empty_grant_list_holds_nothing(s in ".*") {
                let user = User::new(1, "x").with_role(Role::new(1, "r").with_permissions(Vec::new()));
                prop_assert!(!has_permission(Some(&user), &s));
            }

            /// Property: any/all over two slugs reduce to or/and of single checks.
            #[test]
            fn any_and_all_reduce_to_single_checks(
                grants in proptest::collection::vec(slug(), 0..6),
                a in slug(),
                b in slug(),
            ) {
                let refs: Vec<&str> = grants.iter().map(String::as_str).collect();
                let user = user_with(&refs);
                let u = Some(&user);

                prop_assert_eq!(
                    has_any_permission(u, &[a.as_str(), b.as_str()]),
                    has_permission(u, &a) || has_permission(u, &b)
                );
                prop_assert_eq!(
                    has_all_permissions(u, &[a.as_str(), b.as_str()]),
                    has_permission(u, &a) && has_permission(u, &b)
                );
            }

            /// Property: empty requirement lists are denied for every user.
            #[test]
            fn empty_requirements_denied(grants in proptest::collection::vec(slug(), 0..6)) {
                let refs: Vec<&str> = grants.iter().map(String::as_str).collect();
                let user = user_with(&refs);
                let none: [&str; 0] = [];
                prop_assert!(!has_any_permission(Some(&user), &none));
                prop_assert!(!has_all_permissions(Some(&user), &none));
            }
        }
    }
}
