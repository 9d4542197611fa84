//! Credentials and the session descriptor returned to callers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::namespace::derive_namespace;

/// A username/password pair, both already checked to be non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Where and how a caller reaches their own per-user database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    #[schema(example = "alice")]
    pub username: String,
    /// URL of the caller's per-user database
    #[schema(example = "http://127.0.0.1:5984/userdb-616c696365")]
    pub db_url: String,
    /// `[username, password]` for Basic Auth against `dbUrl`
    #[schema(value_type = Vec<String>, example = json!(["alice", "secret"]))]
    pub db_credentials: (String, String),
}

impl UserSession {
    /// Describe the per-user database under `base_url` for these credentials.
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        let db_url = format!("{}/{}", base_url, derive_namespace(&credentials.username));
        Self {
            username: credentials.username.clone(),
            db_url,
            db_credentials: (credentials.username, credentials.password),
        }
    }
}
