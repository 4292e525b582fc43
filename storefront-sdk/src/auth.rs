//! Credentials for the storefront REST API.
//!
//! Every client is handed an [`AuthContext`] when it is constructed. Nothing
//! in this crate reads tokens from ambient storage.

use std::fmt;

/// Header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// An explicit credential passed into every collaborator client.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    /// Authenticate as a signed-in user with the given bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// No credentials. Requests are sent without an `Authorization` header.
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The full `Authorization` header value, if any.
    pub fn header_value(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };
        f.debug_struct("AuthContext").field("token", &token).finish()
    }
}
