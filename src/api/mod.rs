//! API layer - HTTP handlers and hosting
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers
//! - Custom extractors
//! - Route definitions
//! - Server lifecycle

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use server::Server;
pub use state::AppState;
