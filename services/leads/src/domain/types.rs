use chrono::{DateTime, Utc};

use vitrex_domain::id::{AgentId, SubmissionId, UserId};
use vitrex_domain::payload::FormType;
use vitrex_domain::referral::ReferralCode;

/// Referral partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub referral_code: ReferralCode,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Agent plus the number of submissions attributed to it.
#[derive(Debug, Clone)]
pub struct AgentWithStats {
    pub agent: Agent,
    pub submission_count: u64,
}

/// A recorded form submission.
#[derive(Debug, Clone)]
pub struct FormSubmission {
    pub id: SubmissionId,
    pub form_type: FormType,
    pub form_data: serde_json::Value,
    pub user_id: Option<UserId>,
    pub agent_id: Option<AgentId>,
    /// Raw referral code as received, kept even when no agent resolved.
    pub referral_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FormSubmission {
    pub fn linkage(&self) -> AgentLinkage {
        match (self.agent_id, &self.referral_code) {
            (Some(agent_id), _) => AgentLinkage::Linked(agent_id),
            (None, Some(_)) => AgentLinkage::UnlinkedKnownCode,
            (None, None) => AgentLinkage::NoCode,
        }
    }
}

/// How a submission relates to a referral agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentLinkage {
    Linked(AgentId),
    /// A code was carried but did not resolve to an active agent.
    UnlinkedKnownCode,
    NoCode,
}

impl AgentLinkage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linked(_) => "linked",
            Self::UnlinkedKnownCode => "unlinked-known-code",
            Self::NoCode => "no-code",
        }
    }
}

/// Backoffice filter for submission listings.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub form_type: Option<FormType>,
    pub agent_id: Option<AgentId>,
}

/// Account holder.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Message handed to the mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Technical sending account.
    pub from: String,
    /// Display name shown to the operator (the submitter's name).
    pub from_name: String,
    /// Submitter's own address so the operator can answer directly.
    pub reply_to: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Result of a notification attempt. Never an error: the caller always gets
/// something actionable to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// Transport failed; the user can send the pre-filled message themselves.
    Fallback { mailto: String },
    /// Transport failed and no usable mailto link could be built.
    Unavailable { contact_phone: String },
}

/// Cap on referral code draws before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 20;

/// Longest mailto link mail clients reliably accept.
pub const MAX_MAILTO_LEN: usize = 2000;

/// Minimum password length at registration.
pub const MIN_PASSWORD_LEN: usize = 8;
