//! `arena-core`: shared building blocks for the arena admin workspace.
//!
//! Pure types only: identifiers coming from the booking backend and the
//! domain error model. No IO lives here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{PermissionId, RoleId, UserId};
