//! Registration and login handlers.

use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use crate::api::extractors::FormOrJson;
use crate::api::AppState;
use crate::config::MSG_REGISTERED;
use crate::domain::{Credentials, Registration};
use crate::errors::AppResult;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = Registration,
    responses(
        (status = 201, description = "User registered successfully", body = String),
        (status = 400, description = "Missing field, password mismatch or email already exists", body = String),
        (status = 500, description = "Server error", body = String)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    FormOrJson(payload): FormOrJson<Registration>,
) -> AppResult<(StatusCode, &'static str)> {
    state.auth_service.register(payload).await?;

    Ok((StatusCode::CREATED, MSG_REGISTERED))
}

/// Verify credentials and redirect to the post-login page.
///
/// No session or token is issued.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = Credentials,
    responses(
        (status = 302, description = "Login successful, redirect to the authenticated area"),
        (status = 400, description = "Missing field or invalid email or password", body = String),
        (status = 500, description = "Server error", body = String)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    FormOrJson(payload): FormOrJson<Credentials>,
) -> AppResult<Response> {
    state.auth_service.login(payload).await?;

    Ok((StatusCode::FOUND, [(LOCATION, &*state.login_redirect)]).into_response())
}
