//! `arena-auth`: permission resolution and UI/route gating.
//!
//! Pure and synchronous: callers pass the user and catalog snapshots in;
//! nothing here fetches, caches, or reaches for global state. Every check is
//! fail-closed (missing data denies).

pub mod authorize;
pub mod catalog;
pub mod gate;
pub mod naming;
pub mod navigation;
pub mod permissions;
pub mod resolver;
pub mod roles;
pub mod routes;
pub mod user;

pub use authorize::{
    AccessError, AccessExplanation, AccessRequest, DenialKind, explain, require_permission,
    require_route,
};
pub use catalog::{CatalogSnapshot, PermissionCatalog, permission_exists, permissions_by_pattern};
pub use gate::{DEFAULT_REDIRECT, Gate, GateProps, GuardOutcome, RouteGuard};
pub use naming::generate_constant_name;
pub use navigation::{MenuItem, visible_entries};
pub use permissions::{PermissionRecord, PermissionStatus, Slug};
pub use resolver::{can_access_route, has_all_permissions, has_any_permission, has_permission};
pub use roles::Role;
pub use routes::{RoutePermissionMap, normalize_path};
pub use user::{GrantSet, User};
