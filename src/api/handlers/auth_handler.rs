//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::{CredentialsRequest, ValidatedCredentials};
use crate::api::AppState;
use crate::domain::UserSession;
use crate::errors::AppResult;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user and provision their database
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User created", body = UserSession),
        (status = 400, description = "Missing username or password"),
        (status = 409, description = "User already exists"),
        (status = 500, description = "Unexpected backend answer"),
        (status = 502, description = "Backend unreachable")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedCredentials(credentials): ValidatedCredentials,
) -> AppResult<Json<UserSession>> {
    let session = state.backend.create_user(credentials).await?;
    tracing::info!(username = %session.username, "User registered");
    Ok(Json(session))
}

/// Check credentials against the user's database
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = UserSession),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid username/password"),
        (status = 500, description = "Unexpected backend answer"),
        (status = 502, description = "Backend unreachable")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedCredentials(credentials): ValidatedCredentials,
) -> AppResult<Json<UserSession>> {
    let session = state.backend.verify_credentials(credentials).await?;
    Ok(Json(session))
}
