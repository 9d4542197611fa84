//! Credentials extractor - Accepts JSON or urlencoded bodies.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    Form, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Credentials;

/// Register/login request body
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CredentialsRequest {
    /// Backend username
    #[serde(default)]
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    /// Backend password
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "secret")]
    pub password: String,
}

/// Extracts non-empty credentials from the request body.
///
/// Missing fields, empty values or an undecodable body reject with a bare
/// `400 Bad Request` and the handler never runs.
///
/// # Example
///
/// ```rust,ignore
/// async fn login(ValidatedCredentials(credentials): ValidatedCredentials) {
///     // credentials.username and credentials.password are non-empty
/// }
/// ```
pub struct ValidatedCredentials(pub Credentials);

#[async_trait]
impl<S> FromRequest<S> for ValidatedCredentials
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = if is_json(&req) {
            Json::<CredentialsRequest>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|e| {
                    tracing::debug!(error = %e.body_text(), "Rejected JSON credentials body");
                    StatusCode::BAD_REQUEST
                })?
        } else {
            Form::<CredentialsRequest>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|e| {
                    tracing::debug!(error = %e.body_text(), "Rejected form credentials body");
                    StatusCode::BAD_REQUEST
                })?
        };

        payload.validate().map_err(|e| {
            tracing::debug!(error = %e, "Incomplete credentials");
            StatusCode::BAD_REQUEST
        })?;

        Ok(ValidatedCredentials(Credentials::new(
            payload.username,
            payload.password,
        )))
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false)
}
