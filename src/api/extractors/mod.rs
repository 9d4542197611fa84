//! Custom request extractors.

mod credentials;

pub use credentials::{CredentialsRequest, ValidatedCredentials};
