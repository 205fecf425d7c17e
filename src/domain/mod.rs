//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod credentials;
pub mod password;
pub mod user;

pub use credentials::{Credentials, Registration};
pub use password::{Argon2Hasher, Password, PasswordHasher};
pub use user::{NewUser, User};

#[cfg(test)]
pub use password::MockPasswordHasher;
