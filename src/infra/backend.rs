//! CouchDB backend client.
//!
//! Two operations, each a single round trip with no retries:
//! - `verify_credentials`: Basic Auth GET against the user's own database
//! - `create_user`: admin PUT of a user document into `_users`

use std::error::Error as _;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::{Config, USERS_DB_PATH, USER_DOC_PREFIX, USER_DOC_TYPE};
use crate::domain::{derive_namespace, Credentials, UserSession};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Backend operations the request handlers depend on.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Check credentials against the user's database (200 / 401 / other)
    async fn verify_credentials(&self, credentials: Credentials) -> AppResult<UserSession>;

    /// Create the user document (201 / 409 / other)
    async fn create_user(&self, credentials: Credentials) -> AppResult<UserSession>;
}

/// User document as stored in `_users`.
#[derive(Debug, Serialize)]
struct UserDocument<'a> {
    #[serde(rename = "_id")]
    id: String,
    name: &'a str,
    #[serde(rename = "type")]
    doc_type: &'static str,
    roles: Vec<String>,
    password: &'a str,
}

/// CouchDB error body, e.g. `{"error":"forbidden","reason":"..."}`.
#[derive(Debug, Deserialize)]
struct CouchErrorBody {
    reason: Option<String>,
}

/// Concrete implementation of BackendClient over HTTP.
pub struct CouchClient {
    http: reqwest::Client,
    base_url: String,
    admin_user: String,
    admin_password: String,
}

impl CouchClient {
    /// Build a client for the backend named in `config`.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.couchdb_url.clone(),
            admin_user: config.admin_user.clone(),
            admin_password: config.admin_password().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_document_url(&self, username: &str) -> String {
        format!(
            "{}/{}/{}{}",
            self.base_url,
            USERS_DB_PATH,
            USER_DOC_PREFIX,
            urlencoding::encode(username)
        )
    }
}

#[async_trait]
impl BackendClient for CouchClient {
    async fn verify_credentials(&self, credentials: Credentials) -> AppResult<UserSession> {
        let namespace = derive_namespace(&credentials.username);
        let url = format!("{}/{}", self.base_url, namespace);

        let response = self
            .http
            .get(&url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await
            .map_err(|e| transport_error(&namespace, &e))?;

        let status = response.status();
        tracing::debug!(namespace = %namespace, status = %status, "Credential check answered");

        match status {
            StatusCode::OK => Ok(UserSession::new(&self.base_url, credentials)),
            StatusCode::UNAUTHORIZED => Err(AppError::invalid_credentials()),
            _ => Err(AppError::unexpected(error_reason(response).await)),
        }
    }

    async fn create_user(&self, credentials: Credentials) -> AppResult<UserSession> {
        let namespace = derive_namespace(&credentials.username);
        let document = UserDocument {
            id: format!("{}{}", USER_DOC_PREFIX, credentials.username),
            name: &credentials.username,
            doc_type: USER_DOC_TYPE,
            roles: Vec::new(),
            password: &credentials.password,
        };

        let response = self
            .http
            .put(self.user_document_url(&credentials.username))
            .basic_auth(&self.admin_user, Some(&self.admin_password))
            .json(&document)
            .send()
            .await
            .map_err(|e| transport_error(&namespace, &e))?;

        let status = response.status();
        tracing::debug!(namespace = %namespace, status = %status, "User creation answered");

        match status {
            StatusCode::CREATED => Ok(UserSession::new(&self.base_url, credentials)),
            StatusCode::CONFLICT => Err(AppError::user_exists()),
            _ => Err(AppError::unexpected(error_reason(response).await)),
        }
    }
}

/// Map a transport failure to a `db` error, keeping the underlying cause.
fn transport_error(namespace: &str, err: &reqwest::Error) -> AppError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    tracing::warn!(namespace = %namespace, error = %message, "Backend unreachable");
    AppError::db(message)
}

/// The `reason` field of a CouchDB error body, or empty.
async fn error_reason(response: reqwest::Response) -> String {
    response
        .json::<CouchErrorBody>()
        .await
        .ok()
        .and_then(|body| body.reason)
        .unwrap_or_default()
}
