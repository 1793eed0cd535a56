//! Session resolution and the admin guard

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, warn};

use crate::application::IdentityService;
use crate::domain::User;
use crate::interfaces::http::common::cookies::{FLASH_COOKIE, SESSION_COOKIE};
use crate::interfaces::http::common::{
    redirect_with, request_cookies, with_cookies, CookieSettings, Flash,
};

pub const LOGIN_PATH: &str = "/accounts/login";
pub const REGISTER_PATH: &str = "/accounts/register";

const REGISTER_DENIED: &str = "You are not authorized to access the registration page.";
const ANALYTICS_DENIED: &str = "You are not authorized to access the analytics pages.";

/// State needed to resolve sessions and write cookies.
#[derive(Clone)]
pub struct SessionState {
    pub identity: Arc<IdentityService>,
    pub cookies: CookieSettings,
}

/// Who is making the request and the flash message waiting for them.
///
/// Inserted by [`session_middleware`]; extracting it outside that
/// middleware yields an anonymous context.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    pub user: Option<User>,
    pub flash: Option<Flash>,
}

impl RequestContext {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default())
    }
}

fn sets_cookie(response: &Response, name: &str) -> bool {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&prefix))
}

/// Resolve the session cookie to a user and pick up the pending flash.
///
/// The flash cookie is consumed once a page has been rendered; redirects
/// carry it forward. Session cookies that no longer resolve are cleared.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let cookies = request_cookies(request.headers());

    let mut stale_session = false;
    let user = match cookies.get(SESSION_COOKIE).filter(|t| !t.is_empty()) {
        Some(token) => match state.identity.resolve_session(token).await {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                stale_session = true;
                None
            }
            Err(e) => {
                error!("Failed to resolve session: {}", e);
                None
            }
        },
        None => None,
    };

    let has_flash = cookies.contains_key(FLASH_COOKIE);
    let flash = cookies.get(FLASH_COOKIE).and_then(|raw| Flash::decode(raw));

    request
        .extensions_mut()
        .insert(RequestContext { user, flash });

    let response = next.run(request).await;

    let mut cleared = Vec::new();
    if has_flash && !response.status().is_redirection() && !sets_cookie(&response, FLASH_COOKIE) {
        cleared.push(state.cookies.removal(FLASH_COOKIE));
    }
    if stale_session && !sets_cookie(&response, SESSION_COOKIE) {
        cleared.push(state.cookies.removal(SESSION_COOKIE));
    }
    with_cookies(response, &cleared)
}

/// Admin-only guard for privileged routes.
///
/// Anonymous visitors go to the login page; signed-in non-admins go to `/`
/// with an error flash.
pub async fn require_admin(
    State(state): State<SessionState>,
    ctx: RequestContext,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(user) = &ctx.user else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    if user.is_admin() {
        return next.run(request).await;
    }

    let path = request.uri().path();
    warn!(username = %user.username, role = %user.role, path, "Admin page denied");

    let message = if path.starts_with(REGISTER_PATH) {
        REGISTER_DENIED
    } else {
        ANALYTICS_DENIED
    };
    redirect_with("/", &[state.cookies.flash(&Flash::error(message))])
}
