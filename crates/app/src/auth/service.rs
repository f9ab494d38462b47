//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{AuthenticatedUser, Credentials, NewRegistration},
        password::{hash_password, verify_password},
        session::SessionTokens,
    },
    domain::users::{
        data::{NewUser, ProfileUpdate},
        records::{UserRecord, UserRole, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgUsersRepository,
    tokens: SessionTokens,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, tokens: SessionTokens) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(name = "auth.service.register", skip(self, registration), err)]
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        if registration.name.trim().is_empty()
            || registration.email.trim().is_empty()
            || registration.password.is_empty()
            || registration.phone.trim().is_empty()
        {
            return Err(AuthServiceError::MissingRequiredData);
        }

        let password_hash =
            hash_password(&registration.password).map_err(AuthServiceError::Hash)?;

        let user = self
            .repository
            .create_user(&NewUser {
                uuid: UserUuid::new(),
                name: registration.name.trim().to_string(),
                email: registration.email.trim().to_string(),
                phone: registration.phone.trim().to_string(),
                password_hash,
                role: UserRole::Customer,
            })
            .await?;

        let token = self
            .tokens
            .issue(&user, Timestamp::now())
            .map_err(AuthServiceError::Token)?;

        info!(user_uuid = %user.uuid, "registered user");

        Ok(AuthenticatedUser { user, token })
    }

    #[tracing::instrument(name = "auth.service.login", skip(self, credentials), err)]
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, AuthServiceError> {
        let found = self
            .repository
            .find_user_by_email(credentials.email.trim())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let valid = verify_password(&credentials.password, &found.password_hash)
            .map_err(AuthServiceError::Hash)?;

        if !valid {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&found.user, Timestamp::now())
            .map_err(AuthServiceError::Token)?;

        Ok(AuthenticatedUser {
            user: found.user,
            token,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<UserRecord, AuthServiceError> {
        let user_uuid = self.tokens.verify(token).map_err(AuthServiceError::Token)?;

        // The row is loaded on every request so revoked or deleted accounts
        // fail even while their token is still within its expiry window.
        self.repository
            .get_user(user_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)
    }

    #[tracing::instrument(name = "auth.service.update_profile", skip(self, update), err)]
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AuthServiceError> {
        if update.name.trim().is_empty() || update.phone.trim().is_empty() {
            return Err(AuthServiceError::MissingRequiredData);
        }

        self.repository
            .update_profile(user, &update)
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

/// Bootstrap an administrator account. Used by the CLI, not the storefront;
/// registration over HTTP only ever creates customers.
///
/// # Errors
///
/// Returns [`AuthServiceError::AlreadyExists`] when the email is taken, and
/// propagates hashing and storage failures.
pub async fn create_admin(
    pool: PgPool,
    registration: NewRegistration,
) -> Result<UserRecord, AuthServiceError> {
    if registration.name.trim().is_empty()
        || registration.email.trim().is_empty()
        || registration.password.is_empty()
        || registration.phone.trim().is_empty()
    {
        return Err(AuthServiceError::MissingRequiredData);
    }

    let password_hash = hash_password(&registration.password).map_err(AuthServiceError::Hash)?;

    let repository = PgUsersRepository::new(pool);

    let user = repository
        .create_user(&NewUser {
            uuid: UserUuid::new(),
            name: registration.name.trim().to_string(),
            email: registration.email.trim().to_string(),
            phone: registration.phone.trim().to_string(),
            password_hash,
            role: UserRole::Admin,
        })
        .await?;

    Ok(user)
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and log it in. Duplicate emails fail with
    /// [`AuthServiceError::AlreadyExists`].
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Verify credentials and issue a session token. Unknown email and wrong
    /// password are indistinguishable to the caller.
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Resolve a session token to its (still existing) user.
    async fn authenticate(&self, token: &str) -> Result<UserRecord, AuthServiceError>;

    /// Update the caller's display name and phone number.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AuthServiceError>;
}
