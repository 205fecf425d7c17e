//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::auth_handler;
use crate::domain::{Credentials, Registration};

/// OpenAPI documentation for the account API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account API",
        version = "0.1.0",
        description = "User registration and login backed by a user store and Argon2 password hashing",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
    ),
    components(
        schemas(
            Registration,
            Credentials,
        )
    ),
    tags(
        (name = "Authentication", description = "User registration and login")
    )
)]
pub struct ApiDoc;
