use std::fmt;

/// Outcome of the token exchange performed at gateway initialization.
///
/// A session without a token is a valid value: authentication failures are
/// soft, and later calls simply present an empty bearer header.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    bearer_token: Option<String>,
}

impl Session {
    /// Session built from a provider `access_token`.
    pub fn authenticated(access_token: &str) -> Self {
        Self {
            bearer_token: Some(format!("Bearer {}", access_token)),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// Full `Authorization` header value, e.g. `Bearer abc`.
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Header value sent on bearer calls; empty when authentication failed.
    pub fn authorization_value(&self) -> &str {
        self.bearer_token.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_session_prefixes_bearer() {
        let session = Session::authenticated("abc123");
        assert!(session.is_authenticated());
        assert_eq!(session.bearer_token(), Some("Bearer abc123"));
        assert_eq!(session.authorization_value(), "Bearer abc123");
    }

    #[test]
    fn test_unauthenticated_session_has_empty_header() {
        let session = Session::unauthenticated();
        assert!(!session.is_authenticated());
        assert_eq!(session.authorization_value(), "");
        assert!(!format!("{:?}", Session::authenticated("abc123")).contains("abc123"));
    }
}
