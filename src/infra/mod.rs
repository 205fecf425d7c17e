//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - User repositories (Postgres and in-memory)

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{MemoryUserStore, UserRepository, UserStore};

#[cfg(test)]
pub use repositories::MockUserRepository;
