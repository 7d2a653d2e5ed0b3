//! Installation access tokens.

use chrono::{DateTime, Utc};
use secrecy::SecretString;

/// A short-lived, repository-scoped GitHub App installation credential.
///
/// The token value is wrapped in [`SecretString`] so it cannot leak through
/// `Debug` output or logging. This crate never caches tokens; callers own the
/// lifecycle and should mint a fresh one when the expiry passes.
#[derive(Debug)]
pub struct InstallationToken {
    /// The bearer token value.
    pub token: SecretString,

    /// Expiry reported by GitHub, if the response carried a parseable one.
    pub expires_at: Option<DateTime<Utc>>,
}
