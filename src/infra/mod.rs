//! Infrastructure layer - External systems integration
//!
//! Everything that talks to the CouchDB backend lives here.

pub mod backend;

pub use backend::{BackendClient, CouchClient};

#[cfg(any(test, feature = "test-utils"))]
pub use backend::MockBackendClient;
