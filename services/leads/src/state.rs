use sea_orm::DatabaseConnection;

use vitrex_auth_types::policy::AdminPolicy;

use crate::infra::db::{DbAgentRepository, DbSubmissionRepository, DbUserRepository};
use crate::infra::mail::HttpMailTransport;
use crate::usecase::notification::DispatchNotificationUseCase;
use crate::usecase::submission::RecordSubmissionUseCase;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mail: HttpMailTransport,
    pub policy: AdminPolicy,
    pub mail_sender: String,
    pub operator_email: String,
    pub contact_phone: String,
    pub cookie_domain: Option<String>,
}

impl AppState {
    pub fn agent_repo(&self) -> DbAgentRepository {
        DbAgentRepository {
            db: self.db.clone(),
        }
    }

    pub fn submission_repo(&self) -> DbSubmissionRepository {
        DbSubmissionRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn recorder(&self) -> RecordSubmissionUseCase<DbAgentRepository, DbSubmissionRepository> {
        RecordSubmissionUseCase {
            agents: self.agent_repo(),
            submissions: self.submission_repo(),
        }
    }

    pub fn dispatcher(&self) -> DispatchNotificationUseCase<HttpMailTransport> {
        DispatchNotificationUseCase {
            transport: self.mail.clone(),
            sender: self.mail_sender.clone(),
            operator_email: self.operator_email.clone(),
            contact_phone: self.contact_phone.clone(),
        }
    }
}
