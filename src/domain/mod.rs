//! Domain layer - Core types independent of transport
//!
//! Contains the per-user namespace scheme and the session descriptor
//! handed back to callers.

pub mod namespace;
pub mod session;

pub use namespace::{derive_namespace, username_from_namespace};
pub use session::{Credentials, UserSession};
