use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use vitrex_auth_types::policy::PolicyError;
use vitrex_core::error::{ServiceError, error_response};
use vitrex_domain::validation::ValidationError;

/// Leads service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum LeadsServiceError {
    #[error("agent not found")]
    AgentNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("submission not found")]
    SubmissionNotFound,
    #[error("agent email already in use")]
    AgentEmailTaken,
    #[error("user email already in use")]
    UserEmailTaken,
    #[error("referral code already issued")]
    ReferralCodeTaken,
    #[error("could not generate a unique referral code, try again")]
    GenerationExhausted,
    #[error(transparent)]
    InvalidPayload(#[from] ValidationError),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("forbidden")]
    Forbidden,
    #[error("the main administrator account cannot be modified")]
    ProtectedAccount,
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<PolicyError> for LeadsServiceError {
    fn from(e: PolicyError) -> Self {
        match e {
            PolicyError::Forbidden => Self::Forbidden,
            PolicyError::ProtectedAccount => Self::ProtectedAccount,
        }
    }
}

impl ServiceError for LeadsServiceError {
    fn kind(&self) -> &'static str {
        match self {
            Self::AgentNotFound => "AGENT_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SubmissionNotFound => "SUBMISSION_NOT_FOUND",
            Self::AgentEmailTaken => "AGENT_EMAIL_TAKEN",
            Self::UserEmailTaken => "USER_EMAIL_TAKEN",
            Self::ReferralCodeTaken => "REFERRAL_CODE_TAKEN",
            Self::GenerationExhausted => "GENERATION_EXHAUSTED",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            Self::Forbidden => "FORBIDDEN",
            Self::ProtectedAccount => "PROTECTED_ACCOUNT",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::AgentNotFound | Self::UserNotFound | Self::SubmissionNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::AgentEmailTaken | Self::UserEmailTaken | Self::ReferralCodeTaken => {
                StatusCode::CONFLICT
            }
            Self::GenerationExhausted => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidPayload(_) | Self::MalformedPayload(_) | Self::MissingData => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden | Self::ProtectedAccount => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn fields(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidPayload(e) => serde_json::to_value(&e.fields).ok(),
            _ => None,
        }
    }

    fn internal(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Internal(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for LeadsServiceError {
    fn into_response(self) -> Response {
        error_response(&self)
    }
}
