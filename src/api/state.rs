//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::Argon2Hasher;
use crate::errors::AppResult;
use crate::infra::UserRepository;
use crate::services::{AuthService, Authenticator};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User store, kept for health checks
    pub users: Arc<dyn UserRepository>,
    /// `Location` sent after a successful login
    pub login_redirect: Arc<str>,
    /// Optional directory served for unmatched paths
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Wire the auth service over a user store, with hashing cost and
    /// redirect target taken from the config.
    pub fn from_config(users: Arc<dyn UserRepository>, config: &Config) -> AppResult<Self> {
        let hasher = Arc::new(Argon2Hasher::new(config.hash_cost)?);
        let auth_service = Arc::new(Authenticator::new(users.clone(), hasher));

        Ok(Self {
            auth_service,
            users,
            login_redirect: Arc::from(config.login_redirect.as_str()),
            static_dir: config.static_dir.clone(),
        })
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        users: Arc<dyn UserRepository>,
        login_redirect: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            auth_service,
            users,
            login_redirect: login_redirect.into(),
            static_dir: None,
        }
    }
}
