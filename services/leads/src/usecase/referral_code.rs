use rand::RngExt;

use vitrex_domain::referral::{REFERRAL_CHARSET, REFERRAL_SUFFIX_LEN, ReferralCode};

use crate::domain::repository::AgentRepository;
use crate::domain::types::MAX_GENERATION_ATTEMPTS;
use crate::error::LeadsServiceError;

pub(crate) fn draw_code() -> Result<ReferralCode, LeadsServiceError> {
    let mut rng = rand::rng();
    let suffix: String = (0..REFERRAL_SUFFIX_LEN)
        .map(|_| REFERRAL_CHARSET[rng.random_range(0..REFERRAL_CHARSET.len())] as char)
        .collect();
    ReferralCode::from_suffix(&suffix).map_err(|e| anyhow::Error::new(e).into())
}

/// Draw codes until one is not yet taken, up to `MAX_GENERATION_ATTEMPTS`.
///
/// The pre-check does not reserve the code: the caller must insert the agent
/// and rely on the storage uniqueness constraint to catch a concurrent claim.
pub(crate) async fn draw_unused_code<A: AgentRepository>(
    agents: &A,
) -> Result<ReferralCode, LeadsServiceError> {
    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let code = draw_code()?;
        if !agents.referral_code_exists(&code).await? {
            return Ok(code);
        }
        tracing::debug!(attempt, code = %code, "referral code collision");
    }
    tracing::warn!(
        attempts = MAX_GENERATION_ATTEMPTS,
        "referral code generation exhausted"
    );
    Err(LeadsServiceError::GenerationExhausted)
}

pub struct GenerateReferralCodeUseCase<A: AgentRepository> {
    pub agents: A,
}

impl<A: AgentRepository> GenerateReferralCodeUseCase<A> {
    pub async fn execute(&self) -> Result<ReferralCode, LeadsServiceError> {
        draw_unused_code(&self.agents).await
    }
}
