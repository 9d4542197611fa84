//! Couch Gateway - register/login in front of CouchDB
//!
//! Exposes `POST /register` and `POST /login`. Identity storage and
//! credential checks are delegated to CouchDB: registration creates a user
//! document (and, through `couch_peruser`, a private database), login checks
//! the credentials against that database. Callers receive the URL and
//! credentials of their own database.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Namespace derivation and session types
//! - **infra**: CouchDB backend client
//! - **api**: HTTP handlers, routes and server lifecycle
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! COUCHDB_ADMIN_PASSWORD=secret cargo run -- serve --port 5000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;

// Re-export commonly used types at crate root
pub use api::{AppState, Server};
pub use config::Config;
pub use domain::{derive_namespace, Credentials, UserSession};
pub use errors::{AppError, AppResult, ServerError};
pub use infra::{BackendClient, CouchClient};
