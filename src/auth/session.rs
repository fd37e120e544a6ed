//! Session resolution

use crate::auth::claims::{self, Claims};
use crate::auth::models::Role;
use crate::auth::store::TokenStore;

/// The resolved state of a request's session
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// A decodable session token; its claims decide everything
    Token(Claims),
    /// No token, only the script-readable role marker
    Marker(Role),
    /// Nothing usable in the store
    Anonymous,
}

impl Session {
    /// Resolve the session from whatever the store holds.
    ///
    /// A present token always decides the session: a token that fails to
    /// decode yields `Anonymous` even when a role marker is also present.
    /// The marker only speaks when there is no token at all.
    pub fn resolve(store: &TokenStore) -> Self {
        if let Some(token) = store.token() {
            return match claims::decode(&token) {
                Ok(claims) => Session::Token(claims),
                Err(error) => {
                    tracing::debug!(%error, "session token failed to decode");
                    Session::Anonymous
                }
            };
        }
        match store.legacy_role() {
            Some(role) => Session::Marker(Role::from(role.as_str())),
            None => Session::Anonymous,
        }
    }

    /// Whether the session is live at `now` (unix seconds).
    /// Marker sessions carry no expiry and count as live.
    pub fn is_authenticated(&self, now: i64) -> bool {
        match self {
            Session::Token(claims) => !claims.is_expired(now),
            Session::Marker(_) => true,
            Session::Anonymous => false,
        }
    }

    /// The session's role, reported even when the token is expired
    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Token(claims) => Some(claims.role()),
            Session::Marker(role) => Some(role.clone()),
            Session::Anonymous => None,
        }
    }

    /// Whether the role is exactly `admin`
    pub fn is_admin(&self) -> bool {
        matches!(self.role(), Some(Role::Admin))
    }

    /// Subject claim; only token sessions have one
    pub fn subject(&self) -> Option<&str> {
        match self {
            Session::Token(claims) => Some(&claims.subject_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{AUTHORIZATION, COOKIE};
    use axum::http::{HeaderMap, HeaderValue};
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn token(role: &str, exp: i64) -> String {
        let payload = format!(r#"{{"subject_id":"u-1","role":"{role}","exp":{exp}}}"#);
        format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    fn store_from(cookie: Option<&str>, bearer: Option<&str>) -> TokenStore {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        if let Some(token) = bearer {
            let value = format!("Bearer {token}");
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        }
        TokenStore::from_headers(&headers)
    }

    #[test]
    fn token_wins_over_the_marker() {
        let cookie = format!("token={}; userRole=user", token("admin", 50));
        let session = Session::resolve(&store_from(Some(&cookie), None));
        assert_eq!(session.role(), Some(Role::Admin));
        assert!(matches!(session, Session::Token(_)));
    }

    #[test]
    fn undecodable_token_is_anonymous_even_with_a_marker() {
        let session = Session::resolve(&store_from(Some("token=garbage; userRole=admin"), None));
        assert_eq!(session, Session::Anonymous);
    }

    #[test]
    fn marker_alone_builds_a_marker_session() {
        let session = Session::resolve(&store_from(Some("userRole=admin"), None));
        assert_eq!(session, Session::Marker(Role::Admin));
        assert!(session.is_authenticated(1_700_000_000));
        assert!(session.is_admin());
        assert_eq!(session.subject(), None);
    }

    #[test]
    fn empty_store_is_anonymous() {
        let session = Session::resolve(&store_from(None, None));
        assert_eq!(session, Session::Anonymous);
        assert!(!session.is_authenticated(0));
        assert_eq!(session.role(), None);
    }

    #[test]
    fn bearer_token_resolves_like_a_cookie_token() {
        let session = Session::resolve(&store_from(None, Some(&token("user", 100))));
        assert_eq!(session.subject(), Some("u-1"));
    }

    #[test]
    fn expiry_instant_is_no_longer_authenticated() {
        let session = Session::resolve(&store_from(None, Some(&token("user", 100))));
        assert!(session.is_authenticated(99));
        assert!(!session.is_authenticated(100));
        assert!(!session.is_authenticated(101));
    }

    #[test]
    fn expired_token_still_reports_role_and_subject() {
        let session = Session::resolve(&store_from(None, Some(&token("user", 100))));
        assert!(!session.is_authenticated(200));
        assert_eq!(session.role(), Some(Role::User));
        assert_eq!(session.subject(), Some("u-1"));
    }

    #[test]
    fn admin_means_exactly_the_admin_role() {
        assert!(Session::resolve(&store_from(None, Some(&token("admin", 100)))).is_admin());
        assert!(!Session::resolve(&store_from(None, Some(&token("user", 100)))).is_admin());
        assert!(!Session::resolve(&store_from(None, Some(&token("superadmin", 100)))).is_admin());
        assert!(!Session::resolve(&store_from(Some("userRole=user"), None)).is_admin());
    }
}
