use arena_auth::{GrantSet, User};

/// Authenticated user for a request (absent for anonymous callers).
///
/// Inserted by the auth middleware on every request; anonymous requests are
/// not rejected here, they simply resolve to "no permissions".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    user: Option<User>,
}

impl CurrentUser {
    pub fn new(user: Option<User>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn grants(&self) -> GrantSet {
        GrantSet::from_user(self.user())
    }
}
