//! User repository trait and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::CONFLICT_EMAIL;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations must reject a second user with the same email atomically;
/// the service's lookup before insert is only advisory.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user.
    ///
    /// # Errors
    /// `AppError::Conflict` if the email is already taken.
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Postgres-backed repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let user = user.into_user();
        let active_model = ActiveModel {
            id: Set(user.id),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash.into_string()),
            created_at: Set(user.created_at),
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(User::from(model))
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await.map_err(AppError::from)
    }
}

/// Unique index violations become conflicts; everything else stays a database error.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Insert rejected by unique constraint: {}", detail);
            AppError::conflict(CONFLICT_EMAIL)
        }
        _ => AppError::from(err),
    }
}
