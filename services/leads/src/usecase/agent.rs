use chrono::Utc;

use vitrex_domain::id::AgentId;
use vitrex_domain::validation::{
    FieldErrors, MIN_TEXT_LEN, ValidationError, has_min_len, is_valid_email, is_valid_phone,
};

use crate::domain::repository::AgentRepository;
use crate::domain::types::{Agent, AgentWithStats, MAX_GENERATION_ATTEMPTS};
use crate::error::LeadsServiceError;
use crate::usecase::referral_code::draw_code;

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn validate_agent(name: &str, email: &str, phone: Option<&str>) -> Result<(), ValidationError> {
    let mut errors = FieldErrors::new();
    errors.check("name", has_min_len(name, MIN_TEXT_LEN), "Nom invalide");
    errors.check("email", is_valid_email(email), "Adresse e-mail invalide");
    if let Some(phone) = phone {
        errors.check("phone", is_valid_phone(phone), "Numéro de téléphone invalide");
    }
    errors.into_result()
}

// ── CreateAgent ──────────────────────────────────────────────────────────────

pub struct CreateAgentInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

pub struct CreateAgentUseCase<A: AgentRepository> {
    pub agents: A,
}

impl<A: AgentRepository> CreateAgentUseCase<A> {
    /// Create an active agent with a freshly generated referral code.
    ///
    /// Pre-check collisions and codes claimed concurrently between the
    /// pre-check and the insert share one budget of `MAX_GENERATION_ATTEMPTS`
    /// draws.
    pub async fn execute(&self, input: CreateAgentInput) -> Result<Agent, LeadsServiceError> {
        let name = input.name.trim().to_owned();
        let email = input.email.trim().to_lowercase();
        let phone = blank_to_none(input.phone);
        validate_agent(&name, &email, phone.as_deref())?;

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = draw_code()?;
            if self.agents.referral_code_exists(&code).await? {
                tracing::debug!(attempt, code = %code, "referral code collision");
                continue;
            }

            let now = Utc::now();
            let agent = Agent {
                id: AgentId::generate(),
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                referral_code: code,
                active: true,
                created_at: now,
                updated_at: now,
            };
            match self.agents.create(&agent).await {
                Ok(()) => {
                    tracing::info!(
                        agent_id = %agent.id,
                        referral_code = %agent.referral_code,
                        "agent created"
                    );
                    return Ok(agent);
                }
                Err(LeadsServiceError::ReferralCodeTaken) => {
                    tracing::debug!(attempt, "referral code claimed concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }
        tracing::warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "referral code generation exhausted"
        );
        Err(LeadsServiceError::GenerationExhausted)
    }
}

// ── GetAgent ─────────────────────────────────────────────────────────────────

pub struct GetAgentUseCase<A: AgentRepository> {
    pub agents: A,
}

impl<A: AgentRepository> GetAgentUseCase<A> {
    pub async fn execute(&self, id: AgentId) -> Result<Agent, LeadsServiceError> {
        self.agents
            .find_by_id(id)
            .await?
            .ok_or(LeadsServiceError::AgentNotFound)
    }
}

// ── ListAgents ───────────────────────────────────────────────────────────────

pub struct ListAgentsUseCase<A: AgentRepository> {
    pub agents: A,
}

impl<A: AgentRepository> ListAgentsUseCase<A> {
    pub async fn execute(&self) -> Result<Vec<AgentWithStats>, LeadsServiceError> {
        self.agents.list_with_counts().await
    }
}

// ── UpdateAgent ──────────────────────────────────────────────────────────────

/// Partial update. `phone: Some(None)` clears the phone.
#[derive(Default)]
pub struct UpdateAgentInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub active: Option<bool>,
}

pub struct UpdateAgentUseCase<A: AgentRepository> {
    pub agents: A,
}

impl<A: AgentRepository> UpdateAgentUseCase<A> {
    pub async fn execute(
        &self,
        id: AgentId,
        input: UpdateAgentInput,
    ) -> Result<Agent, LeadsServiceError> {
        if input.name.is_none()
            && input.email.is_none()
            && input.phone.is_none()
            && input.active.is_none()
        {
            return Err(LeadsServiceError::MissingData);
        }
        let mut agent = self
            .agents
            .find_by_id(id)
            .await?
            .ok_or(LeadsServiceError::AgentNotFound)?;

        if let Some(name) = input.name {
            agent.name = name.trim().to_owned();
        }
        if let Some(email) = input.email {
            agent.email = email.trim().to_lowercase();
        }
        if let Some(phone) = input.phone {
            agent.phone = blank_to_none(phone);
        }
        if let Some(active) = input.active {
            if agent.active && !active {
                tracing::info!(agent_id = %agent.id, "agent deactivated");
            }
            agent.active = active;
        }
        validate_agent(&agent.name, &agent.email, agent.phone.as_deref())?;
        agent.updated_at = Utc::now();

        self.agents.update(&agent).await?;
        Ok(agent)
    }
}

// ── DeleteAgent ──────────────────────────────────────────────────────────────

pub struct DeleteAgentUseCase<A: AgentRepository> {
    pub agents: A,
}

impl<A: AgentRepository> DeleteAgentUseCase<A> {
    /// Permanent. Past submissions lose their agent link but keep the raw code.
    pub async fn execute(&self, id: AgentId) -> Result<(), LeadsServiceError> {
        if self.agents.delete(id).await? {
            tracing::info!(agent_id = %id, "agent deleted");
            Ok(())
        } else {
            Err(LeadsServiceError::AgentNotFound)
        }
    }
}
