#![allow(async_fn_in_trait)]

use vitrex_domain::id::{AgentId, SubmissionId, UserId};
use vitrex_domain::pagination::{Page, PageRequest};
use vitrex_domain::referral::ReferralCode;

use crate::domain::types::{
    Agent, AgentWithStats, FormSubmission, OutgoingMail, SubmissionFilter, User,
};
use crate::error::LeadsServiceError;

/// Repository for referral agents.
pub trait AgentRepository: Send + Sync {
    async fn referral_code_exists(&self, code: &ReferralCode) -> Result<bool, LeadsServiceError>;

    async fn find_by_referral_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<Agent>, LeadsServiceError>;

    async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, LeadsServiceError>;

    /// All agents, newest first, with their attributed submission counts.
    async fn list_with_counts(&self) -> Result<Vec<AgentWithStats>, LeadsServiceError>;

    /// Insert an agent. Storage uniqueness is authoritative: a duplicate
    /// email yields `AgentEmailTaken`, a duplicate code `ReferralCodeTaken`.
    async fn create(&self, agent: &Agent) -> Result<(), LeadsServiceError>;

    /// Persist mutable fields (name, email, phone, active). The referral code
    /// is never rewritten.
    async fn update(&self, agent: &Agent) -> Result<(), LeadsServiceError>;

    /// Delete an agent. Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: AgentId) -> Result<bool, LeadsServiceError>;
}

/// Repository for recorded form submissions.
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: &FormSubmission) -> Result<(), LeadsServiceError>;

    async fn find_by_id(
        &self,
        id: SubmissionId,
    ) -> Result<Option<FormSubmission>, LeadsServiceError>;

    /// Newest first.
    async fn list(
        &self,
        filter: &SubmissionFilter,
        page: PageRequest,
    ) -> Result<Page<FormSubmission>, LeadsServiceError>;

    async fn delete(&self, id: SubmissionId) -> Result<bool, LeadsServiceError>;
}

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, LeadsServiceError>;

    /// Insert a user. A duplicate email yields `UserEmailTaken`.
    async fn create(&self, user: &User) -> Result<(), LeadsServiceError>;

    async fn list(&self, page: PageRequest) -> Result<Page<User>, LeadsServiceError>;

    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<(), LeadsServiceError>;

    async fn delete(&self, id: UserId) -> Result<bool, LeadsServiceError>;
}

/// Outbound mail capability.
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), LeadsServiceError>;
}
