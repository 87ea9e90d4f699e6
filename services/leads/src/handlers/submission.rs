use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrex_auth_types::identity::Identity;
use vitrex_auth_types::policy::Action;
use vitrex_domain::id::{AgentId, SubmissionId, UserId};
use vitrex_domain::pagination::{Page, PageRequest};
use vitrex_domain::payload::FormType;

use crate::domain::types::{FormSubmission, SubmissionFilter};
use crate::error::LeadsServiceError;
use crate::state::AppState;
use crate::usecase::submission::{
    DeleteSubmissionUseCase, GetSubmissionUseCase, ListSubmissionsUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: SubmissionId,
    pub form_type: FormType,
    pub form_data: serde_json::Value,
    pub user_id: Option<UserId>,
    pub agent_id: Option<AgentId>,
    pub referral_code: Option<String>,
    /// `linked`, `unlinked-known-code` or `no-code`.
    pub linkage: &'static str,
    #[serde(serialize_with = "vitrex_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FormSubmission> for SubmissionResponse {
    fn from(s: FormSubmission) -> Self {
        let linkage = s.linkage().as_str();
        Self {
            id: s.id,
            form_type: s.form_type,
            form_data: s.form_data,
            user_id: s.user_id,
            agent_id: s.agent_id,
            referral_code: s.referral_code,
            linkage,
            created_at: s.created_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SubmissionListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub form_type: Option<String>,
    pub agent_id: Option<Uuid>,
}

// ── GET /admin/submissions ───────────────────────────────────────────────────

pub async fn list_submissions(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<SubmissionResponse>>, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageSubmissions)?;

    let query: SubmissionListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| LeadsServiceError::MissingData)?
        .unwrap_or_default();
    let form_type = query
        .form_type
        .as_deref()
        .map(str::parse::<FormType>)
        .transpose()
        .map_err(|()| LeadsServiceError::MissingData)?;

    let usecase = ListSubmissionsUseCase {
        submissions: state.submission_repo(),
    };
    let page = usecase
        .execute(
            SubmissionFilter {
                form_type,
                agent_id: query.agent_id.map(AgentId),
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(page.map(SubmissionResponse::from)))
}

// ── GET /admin/submissions/{id} ──────────────────────────────────────────────

pub async fn get_submission(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionResponse>, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageSubmissions)?;
    let usecase = GetSubmissionUseCase {
        submissions: state.submission_repo(),
    };
    let submission = usecase.execute(SubmissionId(id)).await?;
    Ok(Json(submission.into()))
}

// ── DELETE /admin/submissions/{id} ───────────────────────────────────────────

pub async fn delete_submission(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, LeadsServiceError> {
    state.policy.authorize(&identity, Action::ManageSubmissions)?;
    let usecase = DeleteSubmissionUseCase {
        submissions: state.submission_repo(),
    };
    usecase.execute(SubmissionId(id)).await?;
    tracing::info!(submission_id = %id, by = %identity.user_id, "submission deleted");
    Ok(StatusCode::NO_CONTENT)
}
