use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrex_auth_types::identity::Identity;
use vitrex_auth_types::policy::Action;
use vitrex_domain::id::UserId;
use vitrex_domain::pagination::{Page, PageRequest};
use vitrex_domain::role::Role;

use crate::error::LeadsServiceError;
use crate::handlers::intake::json_body;
use crate::state::AppState;
use crate::usecase::user::{
    DeleteUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase, SetAdminUseCase,
    UserWithRole,
};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterUserResponse {
    pub id: UserId,
}

pub async fn register_user(
    State(state): State<AppState>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterUserResponse>), LeadsServiceError> {
    let body = json_body(body)?;
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
        policy: state.policy.clone(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RegisterUserResponse { id: user.id })))
}

// ── GET /admin/users ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    #[serde(serialize_with = "vitrex_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserWithRole> for UserResponse {
    fn from(UserWithRole { user, role }: UserWithRole) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role,
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<UserResponse>>, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageUsers)?;
    let query: UserListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| LeadsServiceError::MissingData)?
        .unwrap_or_default();
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
        policy: state.policy.clone(),
    };
    let page = usecase
        .execute(PageRequest::new(query.per_page, query.page))
        .await?;
    Ok(Json(page.map(UserResponse::from)))
}

// ── PATCH /admin/users/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminRequest {
    pub is_admin: bool,
}

pub async fn set_admin(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<SetAdminRequest>, JsonRejection>,
) -> Result<StatusCode, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageUsers)?;
    let body = json_body(body)?;
    let usecase = SetAdminUseCase {
        users: state.user_repo(),
        policy: state.policy.clone(),
    };
    usecase.execute(UserId(id), body.is_admin).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /admin/users/{id} ─────────────────────────────────────────────────

pub async fn delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageUsers)?;
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
        policy: state.policy.clone(),
    };
    usecase.execute(UserId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
