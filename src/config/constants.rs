//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Backend (CouchDB)
// =============================================================================

/// Default backend base URL (for development)
pub const DEFAULT_COUCHDB_URL: &str = "http://127.0.0.1:5984";

/// Default administrator username
pub const DEFAULT_COUCHDB_ADMIN_USER: &str = "admin";

/// Default per-request backend timeout in seconds
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Prefix of every per-user database name
pub const NAMESPACE_PREFIX: &str = "userdb-";

/// Prefix of user document identifiers in the `_users` database
pub const USER_DOC_PREFIX: &str = "org.couchdb.user:";

/// Path of the backend's user database
pub const USERS_DB_PATH: &str = "_users";

/// Document type of user documents
pub const USER_DOC_TYPE: &str = "user";

// =============================================================================
// Error messages surfaced to callers
// =============================================================================

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username/password.";

pub const MSG_USER_EXISTS: &str = "User already exists.";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default directory for static assets
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Headers callers may send cross-origin
pub const CORS_ALLOWED_HEADERS: &[&str] = &["origin", "x-requested-with", "content-type", "accept"];
