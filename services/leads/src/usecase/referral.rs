use vitrex_domain::referral::ReferralCode;

use crate::domain::repository::AgentRepository;
use crate::domain::types::Agent;
use crate::error::LeadsServiceError;

/// Map a raw referral code to the active agent it belongs to.
///
/// Matching is exact once surrounding whitespace is trimmed: `ag-7k2qd` does
/// not resolve to `AG-7K2QD`. Blank, malformed, unknown and inactive codes all
/// resolve to `None`; none of them is an error. The caller keeps the raw
/// string for audit.
pub(crate) async fn resolve_referral<A: AgentRepository>(
    agents: &A,
    code: Option<&str>,
) -> Result<Option<Agent>, LeadsServiceError> {
    let Some(raw) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    let code = match raw.parse::<ReferralCode>() {
        Ok(code) if code.as_str() == raw => code,
        Ok(code) => {
            tracing::debug!(raw, normalized = %code, "ignoring non-canonical referral code");
            return Ok(None);
        }
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed referral code");
            return Ok(None);
        }
    };
    let agent = agents.find_by_referral_code(&code).await?;
    Ok(agent.filter(|a| a.active))
}

pub struct ResolveReferralUseCase<A: AgentRepository> {
    pub agents: A,
}

impl<A: AgentRepository> ResolveReferralUseCase<A> {
    pub async fn execute(&self, code: Option<&str>) -> Result<Option<Agent>, LeadsServiceError> {
        resolve_referral(&self.agents, code).await
    }
}
