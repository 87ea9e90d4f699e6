//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-vitrex-user-id` + `x-vitrex-user-role` headers
//! injected by the gateway. In tests, `MockAuth` builds these headers directly
//! so no real gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use vitrex_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use vitrex_domain::id::UserId;
use vitrex_domain::role::Role;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: UserId,
    pub role: Role,
}

impl MockAuth {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn admin() -> Self {
        Self::new(UserId::generate(), Role::Admin)
    }

    pub fn main_admin() -> Self {
        Self::new(UserId::generate(), Role::MainAdmin)
    }

    pub fn customer() -> Self {
        Self::new(UserId::generate(), Role::Customer)
    }

    /// Header pairs, for request builders that take one header at a time.
    pub fn header_pairs(&self) -> [(HeaderName, HeaderValue); 2] {
        [
            (
                HeaderName::from_static(USER_ID_HEADER),
                HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
            ),
            (
                HeaderName::from_static(USER_ROLE_HEADER),
                HeaderValue::from_static(self.role.as_str()),
            ),
        ]
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        self.header_pairs().into_iter().collect()
    }
}
