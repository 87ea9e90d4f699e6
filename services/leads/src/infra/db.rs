use std::collections::HashMap;

use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use uuid::Uuid;

use vitrex_core::sea_ext::DbErrExt;
use vitrex_domain::id::{AgentId, SubmissionId, UserId};
use vitrex_domain::pagination::{Page, PageRequest};
use vitrex_domain::payload::FormType;
use vitrex_domain::referral::ReferralCode;
use vitrex_leads_schema::{agents, form_submissions, users};

use crate::domain::repository::{AgentRepository, SubmissionRepository, UserRepository};
use crate::domain::types::{Agent, AgentWithStats, FormSubmission, SubmissionFilter, User};
use crate::error::LeadsServiceError;

/// Constraint created by the agents migration.
const AGENTS_REFERRAL_CODE_INDEX: &str = "idx_agents_referral_code";

fn agent_write_error(e: DbErr, action: &'static str) -> LeadsServiceError {
    match e.unique_violation() {
        Some(message) if message.contains(AGENTS_REFERRAL_CODE_INDEX) => {
            LeadsServiceError::ReferralCodeTaken
        }
        Some(_) => LeadsServiceError::AgentEmailTaken,
        None => anyhow::Error::new(e).context(action).into(),
    }
}

// ── Agent repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAgentRepository {
    pub db: DatabaseConnection,
}

impl AgentRepository for DbAgentRepository {
    async fn referral_code_exists(&self, code: &ReferralCode) -> Result<bool, LeadsServiceError> {
        let count = agents::Entity::find()
            .filter(agents::Column::ReferralCode.eq(code.as_str()))
            .count(&self.db)
            .await
            .context("count agents by referral code")?;
        Ok(count > 0)
    }

    async fn find_by_referral_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<Agent>, LeadsServiceError> {
        let model = agents::Entity::find()
            .filter(agents::Column::ReferralCode.eq(code.as_str()))
            .one(&self.db)
            .await
            .context("find agent by referral code")?;
        model.map(agent_from_model).transpose()
    }

    async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, LeadsServiceError> {
        let model = agents::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find agent by id")?;
        model.map(agent_from_model).transpose()
    }

    async fn list_with_counts(&self) -> Result<Vec<AgentWithStats>, LeadsServiceError> {
        let models = agents::Entity::find()
            .order_by_desc(agents::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list agents")?;

        let counts: HashMap<Uuid, i64> = form_submissions::Entity::find()
            .select_only()
            .column(form_submissions::Column::AgentId)
            .column_as(Expr::col(form_submissions::Column::Id).count(), "count")
            .filter(form_submissions::Column::AgentId.is_not_null())
            .group_by(form_submissions::Column::AgentId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await
            .context("count submissions per agent")?
            .into_iter()
            .collect();

        models
            .into_iter()
            .map(|model| {
                let submission_count = counts.get(&model.id).copied().unwrap_or(0);
                Ok(AgentWithStats {
                    agent: agent_from_model(model)?,
                    submission_count: u64::try_from(submission_count).unwrap_or(0),
                })
            })
            .collect()
    }

    async fn create(&self, agent: &Agent) -> Result<(), LeadsServiceError> {
        agents::ActiveModel {
            id: Set(agent.id.0),
            name: Set(agent.name.clone()),
            email: Set(agent.email.clone()),
            phone: Set(agent.phone.clone()),
            referral_code: Set(agent.referral_code.as_str().to_owned()),
            active: Set(agent.active),
            created_at: Set(agent.created_at),
            updated_at: Set(agent.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| agent_write_error(e, "create agent"))?;
        Ok(())
    }

    async fn update(&self, agent: &Agent) -> Result<(), LeadsServiceError> {
        agents::ActiveModel {
            id: Set(agent.id.0),
            name: Set(agent.name.clone()),
            email: Set(agent.email.clone()),
            phone: Set(agent.phone.clone()),
            active: Set(agent.active),
            updated_at: Set(agent.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => LeadsServiceError::AgentNotFound,
            e => agent_write_error(e, "update agent"),
        })?;
        Ok(())
    }

    async fn delete(&self, id: AgentId) -> Result<bool, LeadsServiceError> {
        let result = agents::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete agent")?;
        Ok(result.rows_affected > 0)
    }
}

fn agent_from_model(model: agents::Model) -> Result<Agent, LeadsServiceError> {
    let referral_code = model
        .referral_code
        .parse::<ReferralCode>()
        .with_context(|| format!("stored referral code of agent {}", model.id))?;
    Ok(Agent {
        id: AgentId(model.id),
        name: model.name,
        email: model.email,
        phone: model.phone,
        referral_code,
        active: model.active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Submission repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubmissionRepository {
    pub db: DatabaseConnection,
}

impl SubmissionRepository for DbSubmissionRepository {
    async fn create(&self, submission: &FormSubmission) -> Result<(), LeadsServiceError> {
        form_submissions::ActiveModel {
            id: Set(submission.id.0),
            form_type: Set(submission.form_type.as_str().to_owned()),
            form_data: Set(submission.form_data.clone()),
            user_id: Set(submission.user_id.map(|id| id.0)),
            agent_id: Set(submission.agent_id.map(|id| id.0)),
            referral_code: Set(submission.referral_code.clone()),
            created_at: Set(submission.created_at),
        }
        .insert(&self.db)
        .await
        .context("create form submission")?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: SubmissionId,
    ) -> Result<Option<FormSubmission>, LeadsServiceError> {
        let model = form_submissions::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find form submission by id")?;
        model.map(submission_from_model).transpose()
    }

    async fn list(
        &self,
        filter: &SubmissionFilter,
        page: PageRequest,
    ) -> Result<Page<FormSubmission>, LeadsServiceError> {
        let mut query = form_submissions::Entity::find();
        if let Some(form_type) = filter.form_type {
            query = query.filter(form_submissions::Column::FormType.eq(form_type.as_str()));
        }
        if let Some(agent_id) = filter.agent_id {
            query = query.filter(form_submissions::Column::AgentId.eq(agent_id.0));
        }
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count form submissions")?;
        let models = query
            .order_by_desc(form_submissions::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list form submissions")?;
        let items = models
            .into_iter()
            .map(submission_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        let page = page.clamped();
        Ok(Page {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    async fn delete(&self, id: SubmissionId) -> Result<bool, LeadsServiceError> {
        let result = form_submissions::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete form submission")?;
        Ok(result.rows_affected > 0)
    }
}

fn submission_from_model(
    model: form_submissions::Model,
) -> Result<FormSubmission, LeadsServiceError> {
    let form_type = model
        .form_type
        .parse::<FormType>()
        .map_err(|()| anyhow!("unknown form type {:?} on submission {}", model.form_type, model.id))?;
    Ok(FormSubmission {
        id: SubmissionId(model.id),
        form_type,
        form_data: model.form_data,
        user_id: model.user_id.map(UserId),
        agent_id: model.agent_id.map(AgentId),
        referral_code: model.referral_code,
        created_at: model.created_at,
    })
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, LeadsServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), LeadsServiceError> {
        users::ActiveModel {
            id: Set(user.id.0),
            email: Set(user.email.clone()),
            password: Set(user.password_hash.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            phone: Set(user.phone.clone()),
            is_admin: Set(user.is_admin),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.unique_violation() {
            Some(_) => LeadsServiceError::UserEmailTaken,
            None => anyhow::Error::new(e).context("create user").into(),
        })?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, LeadsServiceError> {
        let total = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        let page = page.clamped();
        Ok(Page {
            items: models.into_iter().map(user_from_model).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<(), LeadsServiceError> {
        users::ActiveModel {
            id: Set(id.0),
            is_admin: Set(is_admin),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => LeadsServiceError::UserNotFound,
            e => anyhow::Error::new(e).context("set user admin flag").into(),
        })?;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, LeadsServiceError> {
        let result = users::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        email: model.email,
        password_hash: model.password,
        first_name: model.first_name,
        last_name: model.last_name,
        phone: model.phone,
        is_admin: model.is_admin,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
