//! Application settings loaded from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::constants::{
    DEFAULT_ARGON2_ITERATIONS, DEFAULT_ARGON2_MEMORY_KIB, DEFAULT_ARGON2_PARALLELISM,
    DEFAULT_DATABASE_URL, DEFAULT_LOGIN_REDIRECT, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    STORE_MEMORY, STORE_POSTGRES,
};

/// Which `UserRepository` implementation backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            STORE_POSTGRES => Ok(StoreKind::Postgres),
            STORE_MEMORY => Ok(StoreKind::Memory),
            other => Err(format!(
                "unknown store '{}', expected '{}' or '{}'",
                other, STORE_POSTGRES, STORE_MEMORY
            )),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Postgres => write!(f, "{}", STORE_POSTGRES),
            StoreKind::Memory => write!(f, "{}", STORE_MEMORY),
        }
    }
}

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_ARGON2_MEMORY_KIB,
            iterations: DEFAULT_ARGON2_ITERATIONS,
            parallelism: DEFAULT_ARGON2_PARALLELISM,
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub store: StoreKind,
    pub server_host: String,
    pub server_port: u16,
    pub login_redirect: String,
    pub static_dir: Option<PathBuf>,
    pub hash_cost: HashCost,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("store", &self.store)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("login_redirect", &self.login_redirect)
            .field("static_dir", &self.static_dir)
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            store: StoreKind::default(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            login_redirect: DEFAULT_LOGIN_REDIRECT.to_string(),
            static_dir: None,
            hash_cost: HashCost::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults in `constants`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let store = match env::var("USER_STORE") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to {}", e, StoreKind::default());
                StoreKind::default()
            }),
            Err(_) => StoreKind::default(),
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            store,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            login_redirect: env::var("LOGIN_REDIRECT")
                .unwrap_or_else(|_| DEFAULT_LOGIN_REDIRECT.to_string()),
            static_dir: env::var("STATIC_DIR").ok().map(PathBuf::from),
            hash_cost: HashCost {
                memory_kib: parse_var("ARGON2_MEMORY_KIB").unwrap_or(DEFAULT_ARGON2_MEMORY_KIB),
                iterations: parse_var("ARGON2_ITERATIONS").unwrap_or(DEFAULT_ARGON2_ITERATIONS),
                parallelism: parse_var("ARGON2_PARALLELISM")
                    .unwrap_or(DEFAULT_ARGON2_PARALLELISM),
            },
        }
    }

    /// Address the HTTP listener binds to.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
