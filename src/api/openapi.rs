//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::extractors::CredentialsRequest;
use crate::api::handlers::auth_handler;
use crate::domain::UserSession;

/// OpenAPI documentation for the gateway
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Couch Gateway",
        version = "0.1.0",
        description = "Register and log in against CouchDB per-user databases",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
    ),
    components(
        schemas(
            CredentialsRequest,
            UserSession,
        )
    ),
    tags(
        (name = "Authentication", description = "User registration and login")
    )
)]
pub struct ApiDoc;
