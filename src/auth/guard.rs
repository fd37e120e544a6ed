//! Route guarding

use crate::auth::models::Role;
use crate::auth::session::Session;
use crate::auth::store::TokenStore;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Where unauthenticated visitors are sent
pub const LOGIN_PATH: &str = "/auth/login";
/// Where authenticated non-admins are sent away from admin routes
pub const USER_HOME: &str = "/dashboard";

/// Notice code carried on a login redirect
pub const NOTICE_LOGIN_REQUIRED: &str = "login-required";
/// Notice code carried on a forbidden redirect
pub const NOTICE_FORBIDDEN: &str = "forbidden";

/// What a route demands of the session
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutePolicy {
    /// Require the admin role on top of authentication
    pub require_admin: bool,
}

/// The guard's verdict for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Let the request through
    Authorized,
    /// No live session; send to the login page
    Unauthenticated,
    /// Live session without the required role; send to `destination`
    Forbidden { destination: &'static str },
}

/// Decide what happens to a session at `now` (unix seconds).
///
/// Authentication is checked before authorization, so an expired admin
/// token is `Unauthenticated`, never `Forbidden`. A forbidden user is
/// sent to their own dashboard; a forbidden unknown role goes back to
/// the login page.
pub fn evaluate(policy: RoutePolicy, session: &Session, now: i64) -> GuardOutcome {
    if !session.is_authenticated(now) {
        return GuardOutcome::Unauthenticated;
    }
    if policy.require_admin && !session.is_admin() {
        let destination = match session.role() {
            Some(Role::User) => USER_HOME,
            _ => LOGIN_PATH,
        };
        return GuardOutcome::Forbidden { destination };
    }
    GuardOutcome::Authorized
}

/// Session material attached to authorized requests
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// The resolved session the guard let through
    pub session: Session,
    /// Raw token for forwarding to the upstream API
    pub bearer: Option<String>,
}

impl SessionContext {
    /// Subject claim of the session, if it has one
    pub fn subject(&self) -> Option<&str> {
        self.session.subject()
    }
}

/// Middleware guarding routes that need any live session
pub async fn require_auth(req: Request, next: Next) -> Response {
    run_guard(RoutePolicy::default(), req, next).await
}

/// Middleware guarding routes that need a live admin session
pub async fn require_admin(req: Request, next: Next) -> Response {
    run_guard(RoutePolicy { require_admin: true }, req, next).await
}

async fn run_guard(policy: RoutePolicy, mut req: Request, next: Next) -> Response {
    let store = TokenStore::from_headers(req.headers());
    let session = Session::resolve(&store);
    let now = chrono::Utc::now().timestamp();

    match evaluate(policy, &session, now) {
        GuardOutcome::Authorized => {
            let bearer = store.token();
            req.extensions_mut().insert(SessionContext { session, bearer });
            next.run(req).await
        }
        GuardOutcome::Unauthenticated => {
            tracing::warn!(
                path = %req.uri().path(),
                notice = NOTICE_LOGIN_REQUIRED,
                "Please login to continue"
            );
            deny(LOGIN_PATH, NOTICE_LOGIN_REQUIRED)
        }
        GuardOutcome::Forbidden { destination } => {
            tracing::warn!(
                path = %req.uri().path(),
                role = ?session.role(),
                notice = NOTICE_FORBIDDEN,
                "You don't have permission to access this page"
            );
            deny(destination, NOTICE_FORBIDDEN)
        }
    }
}

fn deny(destination: &str, notice: &str) -> Response {
    Redirect::to(&format!("{destination}?notice={notice}")).into_response()
}
