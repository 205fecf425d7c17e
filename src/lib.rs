//! Account API - user registration and login over HTTP.
//!
//! Accounts are created with a salted Argon2id digest and looked up by email.
//! Login verifies the digest and redirects; no session is issued.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, request inputs and password hashing
//! - **services**: Registration and login use cases
//! - **infra**: Database, migrations and user stores
//! - **api**: HTTP handlers, extractors and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against Postgres
//! cargo run -- serve
//!
//! # Start the server with an in-memory store
//! cargo run -- serve --store memory
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Credentials, Password, Registration, User};
pub use errors::{AppError, AppResult, ErrorKind};
