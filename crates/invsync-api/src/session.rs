//! Session-token handling for the inventory API.
//!
//! The server authenticates requests with a cookie named `token`. The client
//! models that explicitly: a [`SessionToken`] held by the client is sent as a
//! `token=<value>` cookie on every request.

/// An opaque session token obtained from `POST /api/auth/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `Cookie` header value carrying this token.
    #[must_use]
    pub fn cookie_value(&self) -> String {
        format!("token={}", self.0)
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([redacted])")
    }
}
