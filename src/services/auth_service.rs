//! Authentication service - Account creation and credential verification.
//!
//! SOLID (SRP): Handles authentication concerns only.
//! DDD: Hashing goes through the domain `PasswordHasher`, storage through
//! `UserRepository`; neither is known concretely here.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::config::CONFLICT_EMAIL;
use crate::domain::{Credentials, NewUser, Password, PasswordHasher, Registration, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Plain text behind the digest verified for unknown emails
const DUMMY_PASSWORD: &str = "account-api-dummy-password";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Verify credentials and return the matching user.
    ///
    /// Unknown email and wrong password fail with the same error.
    async fn login(&self, credentials: Credentials) -> AppResult<User>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    dummy_digest: Arc<OnceCell<Password>>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users,
            hasher,
            dummy_digest: Arc::new(OnceCell::new()),
        }
    }

    /// Verify against the stored digest, or against a dummy digest when the
    /// user does not exist so both paths cost one verification.
    async fn verify(&self, password: String, user: Option<&User>) -> AppResult<bool> {
        let hasher = self.hasher.clone();

        match user {
            Some(user) => {
                let digest = user.password_hash.clone();
                blocking(move || hasher.verify(&password, &digest)).await
            }
            None => {
                let dummy = self.dummy_digest.clone();
                blocking(move || {
                    let digest = dummy.get_or_try_init(|| hasher.hash(DUMMY_PASSWORD))?;
                    hasher.verify(&password, digest)?;
                    Ok(false)
                })
                .await
            }
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        registration.check()?;

        let Registration {
            username,
            email,
            password,
            ..
        } = registration;

        // Advisory only: the store's unique constraint settles races
        if self.users.find_by_email(&email).await?.is_some() {
            tracing::debug!("Registration rejected, email already in use");
            return Err(AppError::conflict(CONFLICT_EMAIL));
        }

        let hasher = self.hasher.clone();
        let password_hash = blocking(move || hasher.hash(&password)).await?;

        let user = self
            .users
            .insert(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> AppResult<User> {
        credentials.check()?;

        let Credentials { email, password } = credentials;
        let user = self.users.find_by_email(&email).await?;
        let password_valid = self.verify(password, user.as_ref()).await?;

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(user)
            }
            _ => {
                tracing::debug!("Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

/// Run CPU-bound hashing on the blocking pool.
async fn blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
}
