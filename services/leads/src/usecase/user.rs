use anyhow::anyhow;
use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use chrono::Utc;

use vitrex_auth_types::policy::{AccountChange, AdminPolicy};
use vitrex_domain::id::UserId;
use vitrex_domain::pagination::{Page, PageRequest};
use vitrex_domain::role::Role;
use vitrex_domain::validation::{FieldErrors, is_valid_email, is_valid_name, is_valid_phone};

use crate::domain::repository::UserRepository;
use crate::domain::types::{MIN_PASSWORD_LEN, User};
use crate::error::LeadsServiceError;

/// Hash a password with Argon2id and a random salt. Returns a PHC string.
fn hash_password(password: &str) -> Result<String, LeadsServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

pub struct RegisterUserUseCase<R: UserRepository> {
    pub users: R,
    pub policy: AdminPolicy,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    /// New accounts are never admins; promotion goes through the main admin.
    ///
    /// The main admin's address is reserved: that account is provisioned by
    /// the operator, never through public registration.
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, LeadsServiceError> {
        let phone = input
            .phone
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty());

        let mut errors = FieldErrors::new();
        errors.check("email", is_valid_email(&input.email), "Adresse e-mail invalide");
        errors.check(
            "password",
            input.password.chars().count() >= MIN_PASSWORD_LEN,
            "Le mot de passe doit contenir au moins 8 caractères",
        );
        errors.check("firstName", is_valid_name(&input.first_name), "Prénom invalide");
        errors.check("lastName", is_valid_name(&input.last_name), "Nom invalide");
        if let Some(phone) = phone.as_deref() {
            errors.check("phone", is_valid_phone(phone), "Numéro de téléphone invalide");
        }
        errors.into_result()?;

        if self.policy.is_main_admin(&input.email) {
            tracing::warn!("registration attempted with the main admin address");
            return Err(LeadsServiceError::ProtectedAccount);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            email: input.email.trim().to_lowercase(),
            password_hash: hash_password(&input.password)?,
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.trim().to_owned(),
            phone,
            is_admin: false,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

/// A user together with the role the policy assigns it.
#[derive(Debug, Clone)]
pub struct UserWithRole {
    pub user: User,
    pub role: Role,
}

pub struct ListUsersUseCase<R: UserRepository> {
    pub users: R,
    pub policy: AdminPolicy,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<UserWithRole>, LeadsServiceError> {
        let page = self.users.list(page.clamped()).await?;
        Ok(page.map(|user| UserWithRole {
            role: self.policy.role_for(&user.email, user.is_admin),
            user,
        }))
    }
}

// ── SetAdmin ─────────────────────────────────────────────────────────────────

pub struct SetAdminUseCase<R: UserRepository> {
    pub users: R,
    pub policy: AdminPolicy,
}

impl<R: UserRepository> SetAdminUseCase<R> {
    pub async fn execute(&self, id: UserId, is_admin: bool) -> Result<(), LeadsServiceError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(LeadsServiceError::UserNotFound)?;
        let change = if is_admin {
            AccountChange::Promote
        } else {
            AccountChange::Demote
        };
        self.policy.ensure_mutable(&user.email, change)?;
        self.users.set_admin(id, is_admin).await?;
        tracing::info!(user_id = %id, is_admin, "user admin flag changed");
        Ok(())
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub users: R,
    pub policy: AdminPolicy,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, id: UserId) -> Result<(), LeadsServiceError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(LeadsServiceError::UserNotFound)?;
        self.policy.ensure_mutable(&user.email, AccountChange::Delete)?;
        if !self.users.delete(id).await? {
            return Err(LeadsServiceError::UserNotFound);
        }
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}
