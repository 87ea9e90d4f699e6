use chrono::Utc;

use vitrex_domain::id::{SubmissionId, UserId};
use vitrex_domain::pagination::{Page, PageRequest};
use vitrex_domain::payload::FormPayload;

use crate::domain::repository::{AgentRepository, SubmissionRepository};
use crate::domain::types::{AgentLinkage, FormSubmission, SubmissionFilter};
use crate::error::LeadsServiceError;
use crate::usecase::referral::resolve_referral;

// ── RecordSubmission ─────────────────────────────────────────────────────────

pub struct RecordSubmissionInput {
    pub payload: FormPayload,
    pub user_id: Option<UserId>,
    /// Raw referral code carried by the submission, if any.
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub id: SubmissionId,
    pub linkage: AgentLinkage,
}

pub struct RecordSubmissionUseCase<A, S>
where
    A: AgentRepository,
    S: SubmissionRepository,
{
    pub agents: A,
    pub submissions: S,
}

impl<A, S> RecordSubmissionUseCase<A, S>
where
    A: AgentRepository,
    S: SubmissionRepository,
{
    pub async fn execute(
        &self,
        input: RecordSubmissionInput,
    ) -> Result<RecordedSubmission, LeadsServiceError> {
        let referral_code = input
            .referral_code
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty());
        let agent = resolve_referral(&self.agents, referral_code.as_deref()).await?;

        let submission = FormSubmission {
            id: SubmissionId::generate(),
            form_type: input.payload.form_type(),
            form_data: input.payload.form_data(),
            user_id: input.user_id,
            agent_id: agent.map(|a| a.id),
            referral_code,
            created_at: Utc::now(),
        };
        let linkage = submission.linkage();
        if linkage == AgentLinkage::UnlinkedKnownCode {
            tracing::info!(
                referral_code = submission.referral_code.as_deref().unwrap_or_default(),
                form_type = %submission.form_type,
                "referral code seen but not attributable"
            );
        }

        self.submissions.create(&submission).await?;
        tracing::info!(
            submission_id = %submission.id,
            form_type = %submission.form_type,
            linkage = linkage.as_str(),
            "submission recorded"
        );
        Ok(RecordedSubmission {
            id: submission.id,
            linkage,
        })
    }
}

// ── ListSubmissions ──────────────────────────────────────────────────────────

pub struct ListSubmissionsUseCase<S: SubmissionRepository> {
    pub submissions: S,
}

impl<S: SubmissionRepository> ListSubmissionsUseCase<S> {
    pub async fn execute(
        &self,
        filter: SubmissionFilter,
        page: PageRequest,
    ) -> Result<Page<FormSubmission>, LeadsServiceError> {
        self.submissions.list(&filter, page.clamped()).await
    }
}

// ── GetSubmission ────────────────────────────────────────────────────────────

pub struct GetSubmissionUseCase<S: SubmissionRepository> {
    pub submissions: S,
}

impl<S: SubmissionRepository> GetSubmissionUseCase<S> {
    pub async fn execute(&self, id: SubmissionId) -> Result<FormSubmission, LeadsServiceError> {
        self.submissions
            .find_by_id(id)
            .await?
            .ok_or(LeadsServiceError::SubmissionNotFound)
    }
}

// ── DeleteSubmission ─────────────────────────────────────────────────────────

pub struct DeleteSubmissionUseCase<S: SubmissionRepository> {
    pub submissions: S,
}

impl<S: SubmissionRepository> DeleteSubmissionUseCase<S> {
    pub async fn execute(&self, id: SubmissionId) -> Result<(), LeadsServiceError> {
        if self.submissions.delete(id).await? {
            Ok(())
        } else {
            Err(LeadsServiceError::SubmissionNotFound)
        }
    }
}
