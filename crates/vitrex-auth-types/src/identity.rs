//! Gateway-injected identity headers extractor.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use vitrex_domain::id::UserId;
use vitrex_domain::role::Role;

pub const USER_ID_HEADER: &str = "x-vitrex-user-id";
pub const USER_ROLE_HEADER: &str = "x-vitrex-user-role";

/// User identity injected by the gateway via `x-vitrex-user-id` and
/// `x-vitrex-user-role` (a named role claim: `customer`, `admin`,
/// `main-admin`).
///
/// Returns 401 if either header is absent or malformed. Role enforcement (403)
/// goes through [`crate::policy::AdminPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

fn read_identity(parts: &Parts) -> Option<Result<Identity, StatusCode>> {
    let user_id = parts.headers.get(USER_ID_HEADER);
    let role = parts.headers.get(USER_ROLE_HEADER);
    if user_id.is_none() && role.is_none() {
        return None;
    }
    let user_id = user_id
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<Uuid>().ok());
    let role = role
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<Role>().ok());
    Some(match (user_id, role) {
        (Some(user_id), Some(role)) => Ok(Identity {
            user_id: UserId(user_id),
            role,
        }),
        _ => Err(StatusCode::UNAUTHORIZED),
    })
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = read_identity(parts).unwrap_or(Err(StatusCode::UNAUTHORIZED));
        async move { identity }
    }
}

/// Anonymous visitors are allowed where the handler takes `Option<Identity>`.
/// Malformed headers are treated as anonymous.
impl<S> OptionalFromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let identity = match read_identity(parts) {
            Some(Ok(identity)) => Some(identity),
            Some(Err(_)) => {
                tracing::debug!("ignoring malformed identity headers");
                None
            }
            None => None,
        };
        async move { Ok(identity) }
    }
}
