//! Cookie and header backed token storage

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Cookie holding the session token
pub const TOKEN_COOKIE: &str = "token";
/// Script-readable cookie holding the role marker
pub const ROLE_COOKIE: &str = "userRole";

/// Read and write access to the two session keys.
///
/// Reads prefer an `Authorization: Bearer` header over the token cookie so
/// API clients can authenticate without a cookie jar. Writes go through the
/// jar and are returned to the client as `Set-Cookie` headers.
#[derive(Debug, Clone)]
pub struct TokenStore {
    jar: CookieJar,
    bearer: Option<String>,
    secure: bool,
}

impl TokenStore {
    /// Wrap a request's cookie jar for writing
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self {
            jar,
            bearer: None,
            secure,
        }
    }

    /// Build a read-only store from request headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);
        Self {
            jar: CookieJar::from_headers(headers),
            bearer,
            secure: false,
        }
    }

    /// The session token, bearer header first
    pub fn token(&self) -> Option<String> {
        if let Some(bearer) = &self.bearer {
            return Some(bearer.clone());
        }
        self.jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }

    /// The role marker cookie, if any
    pub fn legacy_role(&self) -> Option<String> {
        self.jar
            .get(ROLE_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }

    /// Store the session token as an http-only cookie
    pub fn set_token(mut self, token: &str) -> Self {
        let cookie = Cookie::build((TOKEN_COOKIE, token.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        self.jar = self.jar.add(cookie);
        self
    }

    /// Store the role marker. Stays script-readable: the SPA renders
    /// navigation from it before any API round trip.
    pub fn set_legacy_role(mut self, role: &str) -> Self {
        let cookie = Cookie::build((ROLE_COOKIE, role.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.secure);
        self.jar = self.jar.add(cookie);
        self
    }

    /// Remove both session keys. Removing keys that are already absent is
    /// a no-op, so clearing twice is safe.
    pub fn clear(mut self) -> Self {
        self.jar = self.jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));
        self.jar = self.jar.remove(Cookie::build(ROLE_COOKIE).path("/"));
        self.bearer = None;
        self
    }

    /// Finish writing and hand the jar back to the response
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    fn headers_with(entries: &[(&axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in entries {
            headers.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn reads_the_token_cookie() {
        let headers = headers_with(&[(&COOKIE, "token=abc123; userRole=admin")]);
        let store = TokenStore::from_headers(&headers);
        assert_eq!(store.token().as_deref(), Some("abc123"));
        assert_eq!(store.legacy_role().as_deref(), Some("admin"));
    }

    #[test]
    fn bearer_header_wins_over_the_cookie() {
        let headers = headers_with(&[
            (&COOKIE, "token=from-cookie"),
            (&AUTHORIZATION, "Bearer from-header"),
        ]);
        let store = TokenStore::from_headers(&headers);
        assert_eq!(store.token().as_deref(), Some("from-header"));
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let headers = headers_with(&[
            (&COOKIE, "token=from-cookie"),
            (&AUTHORIZATION, "Basic dXNlcjpwYXNz"),
        ]);
        let store = TokenStore::from_headers(&headers);
        assert_eq!(store.token().as_deref(), Some("from-cookie"));
    }

    #[test]
    fn empty_headers_read_as_absent() {
        let store = TokenStore::from_headers(&HeaderMap::new());
        assert_eq!(store.token(), None);
        assert_eq!(store.legacy_role(), None);
    }

    #[test]
    fn clear_removes_both_keys() {
        let headers = headers_with(&[(&COOKIE, "token=abc; userRole=user")]);
        let store = TokenStore::from_headers(&headers).clear();
        assert_eq!(store.token(), None);
        assert_eq!(store.legacy_role(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let headers = headers_with(&[(&COOKIE, "token=abc; userRole=user")]);
        let store = TokenStore::from_headers(&headers).clear().clear();
        assert_eq!(store.token(), None);
        assert_eq!(store.legacy_role(), None);
    }

    #[test]
    fn clear_also_drops_the_bearer_snapshot() {
        let headers = headers_with(&[(&AUTHORIZATION, "Bearer tok-1")]);
        let store = TokenStore::from_headers(&headers).clear();
        assert_eq!(store.token(), None);
    }
}
