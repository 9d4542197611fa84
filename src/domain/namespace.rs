//! Per-user database naming.
//!
//! CouchDB's `couch_peruser` provisions one database per user, named
//! `userdb-` followed by the hex encoding of the username bytes.

use crate::config::NAMESPACE_PREFIX;

/// Derive the per-user database name for `username`.
///
/// Case-sensitive, no trimming. The empty username maps to the bare prefix.
pub fn derive_namespace(username: &str) -> String {
    format!("{}{}", NAMESPACE_PREFIX, hex::encode(username.as_bytes()))
}

/// Recover the username a namespace was derived from.
///
/// Returns `None` for names that were not produced by [`derive_namespace`].
pub fn username_from_namespace(namespace: &str) -> Option<String> {
    let encoded = namespace.strip_prefix(NAMESPACE_PREFIX)?;
    let bytes = hex::decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}
