//! Account service: login, logout, registration and session resolution.
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use super::forms::{
    FormErrors, LoginForm, RegisterForm, EMAIL_TAKEN, INVALID_LOGIN, USERNAME_TAKEN,
};
use super::password_policy::PasswordPolicy;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, RepositoryProvider, User, UserActivity, UserRole,
};
use crate::infrastructure::crypto::{
    create_session_token, hash_password_with_cost, verify_password, verify_session_token,
    SessionTokenConfig,
};

/// Outcome of a form-driven use case that failed.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The submission is invalid; show it again with these messages.
    #[error("invalid form submission")]
    Invalid(FormErrors),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A verified login: the user and a signed session token for the cookie.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub user: User,
    pub token: String,
}

/// Identity settings taken from the application config.
#[derive(Debug, Clone)]
pub struct IdentitySettings {
    pub tokens: SessionTokenConfig,
    pub policy: PasswordPolicy,
    pub bcrypt_cost: u32,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            tokens: SessionTokenConfig::default(),
            policy: PasswordPolicy::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    settings: IdentitySettings,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, settings: IdentitySettings) -> Self {
        Self { repos, settings }
    }

    /// Session lifetime, used as the cookie max-age.
    pub fn session_hours(&self) -> i64 {
        self.settings.tokens.expiration_hours
    }

    // ── Authentication ──────────────────────────────────────────

    /// Verify credentials, stamp the login and open an activity row.
    ///
    /// Unknown users, wrong passwords and disabled accounts are
    /// indistinguishable to the caller.
    pub async fn login(
        &self,
        form: &LoginForm,
        now: DateTime<Utc>,
    ) -> Result<LoginSuccess, IdentityError> {
        let errors = form.check();
        if !errors.is_empty() {
            return Err(IdentityError::Invalid(errors));
        }

        let users = self.repos.users();
        let Some(user) = users.get_user_by_username(&form.username).await? else {
            info!(username = %form.username, "Login rejected: unknown user");
            return Err(IdentityError::Invalid(FormErrors::general(INVALID_LOGIN)));
        };

        let valid = verify_password(&form.password, &user.password_hash).unwrap_or(false);
        if !valid || !user.is_active {
            info!(username = %user.username, active = user.is_active, "Login rejected");
            return Err(IdentityError::Invalid(FormErrors::general(INVALID_LOGIN)));
        }

        users.update_last_login(&user.id, now).await?;
        let activity = self.repos.activities().open_session(&user.id, now).await?;

        let token = create_session_token(&user, &self.settings.tokens)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        info!(
            user_id = %user.id,
            username = %user.username,
            activity_id = activity.id,
            "User logged in"
        );
        Ok(LoginSuccess { user, token })
    }

    /// Close the user's open activity row, if any.
    pub async fn logout(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<UserActivity>> {
        let closed = self
            .repos
            .activities()
            .close_latest_session(user_id, now)
            .await?;
        match &closed {
            Some(a) => info!(user_id, activity_id = a.id, "User logged out"),
            None => info!(user_id, "User logged out without an open session"),
        }
        Ok(closed)
    }

    /// The active user a session token belongs to. Invalid or expired
    /// tokens, deleted users and disabled users all resolve to `None`.
    pub async fn resolve_session(&self, token: &str) -> DomainResult<Option<User>> {
        let claims = match verify_session_token(token, &self.settings.tokens) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Ignoring session token: {}", e);
                return Ok(None);
            }
        };

        let user = self.repos.users().get_user_by_id(&claims.sub).await?;
        Ok(user.filter(|u| u.is_active))
    }

    // ── Registration ────────────────────────────────────────────

    /// Create an account from a submitted registration form.
    pub async fn register(&self, form: RegisterForm) -> Result<User, IdentityError> {
        let form = form.normalized();
        let mut errors = form.check();

        let users = self.repos.users();
        if !errors.has("username") && users.get_user_by_username(&form.username).await?.is_some() {
            errors.add("username", USERNAME_TAKEN);
        }
        if !errors.has("email") && users.get_user_by_email(&form.email).await?.is_some() {
            errors.add("email", EMAIL_TAKEN);
        }
        if !errors.has("password2") {
            for problem in self
                .settings
                .policy
                .violations(&form.password2, &form.username, &form.email)
            {
                errors.add("password2", problem);
            }
        }

        let role = UserRole::parse(&form.role);
        let Some(role) = role.filter(|_| errors.is_empty()) else {
            return Err(IdentityError::Invalid(errors));
        };

        let password_hash = hash_password_with_cost(&form.password1, self.settings.bcrypt_cost)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let created = users
            .create_user(CreateUserDto {
                username: form.username.clone(),
                email: form.email.clone(),
                role,
                password_hash,
            })
            .await;

        match created {
            Ok(user) => {
                info!(user_id = %user.id, username = %user.username, role = %user.role, "New user registered");
                Ok(user)
            }
            // Lost a race with a concurrent registration.
            Err(DomainError::Conflict(_)) => {
                let mut errors = FormErrors::default();
                errors.add("username", USERNAME_TAKEN);
                Err(IdentityError::Invalid(errors))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create an admin account when no account exists yet.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        let users = self.repos.users();
        if users.count_users().await? > 0 {
            return Ok(None);
        }

        let password_hash = hash_password_with_cost(password, self.settings.bcrypt_cost)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let admin = users
            .create_user(CreateUserDto {
                username: username.to_string(),
                email: email.trim().to_lowercase(),
                role: UserRole::Admin,
                password_hash,
            })
            .await?;
        Ok(Some(admin))
    }
}
