//! Back-office authorization.
//!
//! Every admin route asks [`AdminPolicy`] instead of comparing emails or
//! flags itself, so the main-admin rule lives in exactly one place.

use vitrex_domain::role::Role;

use crate::identity::Identity;

/// Back-office capability being exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// List, view and delete form submissions.
    ManageSubmissions,
    /// Create, edit and delete referral agents.
    ManageAgents,
    /// Promote, demote and delete user accounts.
    ManageUsers,
}

impl Action {
    fn required_role(self) -> Role {
        match self {
            Self::ManageSubmissions | Self::ManageAgents => Role::Admin,
            Self::ManageUsers => Role::MainAdmin,
        }
    }
}

/// A change applied to another account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountChange {
    Delete,
    Demote,
    Promote,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("insufficient role")]
    Forbidden,
    #[error("the main administrator account cannot be modified")]
    ProtectedAccount,
}

#[derive(Debug, Clone)]
pub struct AdminPolicy {
    main_admin_email: String,
}

impl AdminPolicy {
    pub fn new(main_admin_email: impl Into<String>) -> Self {
        Self {
            main_admin_email: main_admin_email.into().trim().to_lowercase(),
        }
    }

    pub fn is_main_admin(&self, email: &str) -> bool {
        !self.main_admin_email.is_empty() && email.trim().eq_ignore_ascii_case(&self.main_admin_email)
    }

    /// Role claim for a stored account.
    pub fn role_for(&self, email: &str, is_admin: bool) -> Role {
        if self.is_main_admin(email) {
            Role::MainAdmin
        } else if is_admin {
            Role::Admin
        } else {
            Role::Customer
        }
    }

    pub fn authorize(&self, identity: &Identity, action: Action) -> Result<(), PolicyError> {
        if identity.role >= action.required_role() {
            Ok(())
        } else {
            tracing::debug!(
                user_id = %identity.user_id,
                role = %identity.role,
                ?action,
                "authorization denied"
            );
            Err(PolicyError::Forbidden)
        }
    }

    /// The main admin can be neither deleted nor stripped of admin rights.
    pub fn ensure_mutable(
        &self,
        target_email: &str,
        change: AccountChange,
    ) -> Result<(), PolicyError> {
        match change {
            AccountChange::Delete | AccountChange::Demote if self.is_main_admin(target_email) => {
                Err(PolicyError::ProtectedAccount)
            }
            _ => Ok(()),
        }
    }
}
