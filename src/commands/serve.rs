//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, StoreKind};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MemoryUserStore, UserRepository, UserStore};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let store = args.store.unwrap_or(config.store);
    let users = open_store(store, &config).await?;
    tracing::info!("User store ready ({})", store);

    let app_state = AppState::from_config(users, &config)?;

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = bind_addr(&args, &config);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Command-line flags win over `SERVER_HOST` / `SERVER_PORT`.
fn bind_addr(args: &ServeArgs, config: &Config) -> String {
    let mut config = config.clone();
    if let Some(host) = &args.host {
        config.server_host = host.clone();
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    config.server_addr()
}

async fn open_store(store: StoreKind, config: &Config) -> AppResult<Arc<dyn UserRepository>> {
    match store {
        StoreKind::Postgres => {
            let db = Database::connect(&config.database_url)
                .await
                .map_err(AppError::connection_failed)?;
            Ok(Arc::new(UserStore::new(db.get_connection())))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory user store, accounts are lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}
