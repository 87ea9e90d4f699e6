use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use vitrex_auth_types::identity::Identity;
use vitrex_auth_types::policy::Action;
use vitrex_domain::id::AgentId;

use crate::domain::types::{Agent, AgentWithStats};
use crate::error::LeadsServiceError;
use crate::handlers::intake::json_body;
use crate::state::AppState;
use crate::usecase::agent::{
    CreateAgentInput, CreateAgentUseCase, DeleteAgentUseCase, GetAgentUseCase, ListAgentsUseCase,
    UpdateAgentInput, UpdateAgentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub id: AgentId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub referral_code: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_count: Option<u64>,
    #[serde(serialize_with = "vitrex_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "vitrex_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Agent> for AgentResponse {
    fn from(agent: Agent) -> Self {
        Self {
            id: agent.id,
            name: agent.name,
            email: agent.email,
            phone: agent.phone,
            referral_code: agent.referral_code.as_str().to_owned(),
            active: agent.active,
            submission_count: None,
            created_at: agent.created_at,
            updated_at: agent.updated_at,
        }
    }
}

impl From<AgentWithStats> for AgentResponse {
    fn from(stats: AgentWithStats) -> Self {
        Self {
            submission_count: Some(stats.submission_count),
            ..Self::from(stats.agent)
        }
    }
}

// ── POST /admin/agents ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

pub async fn create_agent(
    identity: Identity,
    State(state): State<AppState>,
    body: Result<Json<CreateAgentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AgentResponse>), LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageAgents)?;
    let body = json_body(body)?;
    let usecase = CreateAgentUseCase {
        agents: state.agent_repo(),
    };
    let agent = usecase
        .execute(CreateAgentInput {
            name: body.name,
            email: body.email,
            phone: body.phone,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(agent.into())))
}

// ── GET /admin/agents ────────────────────────────────────────────────────────

pub async fn list_agents(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<AgentResponse>>, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageAgents)?;
    let usecase = ListAgentsUseCase {
        agents: state.agent_repo(),
    };
    let agents = usecase.execute().await?;
    Ok(Json(agents.into_iter().map(AgentResponse::from).collect()))
}

// ── GET /admin/agents/{id} ───────────────────────────────────────────────────

pub async fn get_agent(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AgentResponse>, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageAgents)?;
    let usecase = GetAgentUseCase {
        agents: state.agent_repo(),
    };
    Ok(Json(usecase.execute(AgentId(id)).await?.into()))
}

// ── PATCH /admin/agents/{id} ─────────────────────────────────────────────────

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
pub struct UpdateAgentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    pub active: Option<bool>,
}

pub async fn update_agent(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateAgentRequest>, JsonRejection>,
) -> Result<Json<AgentResponse>, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageAgents)?;
    let body = json_body(body)?;
    let usecase = UpdateAgentUseCase {
        agents: state.agent_repo(),
    };
    let agent = usecase
        .execute(
            AgentId(id),
            UpdateAgentInput {
                name: body.name,
                email: body.email,
                phone: body.phone,
                active: body.active,
            },
        )
        .await?;
    Ok(Json(agent.into()))
}

// ── DELETE /admin/agents/{id} ────────────────────────────────────────────────

pub async fn delete_agent(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageAgents)?;
    let usecase = DeleteAgentUseCase {
        agents: state.agent_repo(),
    };
    usecase.execute(AgentId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
