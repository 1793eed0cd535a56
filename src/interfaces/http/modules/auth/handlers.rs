//! Account page handlers

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tracing::info;

use crate::application::{FormErrors, IdentityError, IdentityService, LoginForm, RegisterForm};
use crate::interfaces::http::common::cookies::SESSION_COOKIE;
use crate::interfaces::http::common::{redirect_with, CookieSettings, Flash, HttpError};
use crate::interfaces::http::middleware::{RequestContext, LOGIN_PATH};
use crate::interfaces::http::views::{Layout, LoginTemplate, RegisterTemplate};

const CORRECT_ERRORS: &str = "Please correct the errors below.";

/// Account handler state
#[derive(Clone)]
pub struct AuthState {
    pub identity: Arc<IdentityService>,
    pub cookies: CookieSettings,
}

pub async fn login_page(ctx: RequestContext) -> LoginTemplate {
    LoginTemplate {
        layout: Layout::new(&ctx),
        username: String::new(),
        errors: FormErrors::default(),
    }
}

pub async fn login(
    State(state): State<AuthState>,
    ctx: RequestContext,
    Form(form): Form<LoginForm>,
) -> Result<Response, HttpError> {
    match state.identity.login(&form, Utc::now()).await {
        Ok(success) => {
            let cookie = state
                .cookies
                .session(&success.token, state.identity.session_hours());
            Ok(redirect_with("/", &[cookie]))
        }
        Err(IdentityError::Invalid(errors)) => {
            let page = LoginTemplate {
                layout: Layout::new(&ctx),
                username: form.username,
                errors,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(IdentityError::Domain(e)) => Err(e.into()),
    }
}

/// Close the open activity row and drop the session cookie.
pub async fn logout(
    State(state): State<AuthState>,
    ctx: RequestContext,
) -> Result<Response, HttpError> {
    let Some(user) = ctx.user else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    state.identity.logout(&user.id, Utc::now()).await?;

    Ok(redirect_with(
        LOGIN_PATH,
        &[
            state.cookies.removal(SESSION_COOKIE),
            state.cookies.flash(&Flash::info("You have been logged out.")),
        ],
    ))
}

pub async fn register_page(ctx: RequestContext) -> RegisterTemplate {
    RegisterTemplate::new(Layout::new(&ctx), "", "", "", FormErrors::default())
}

pub async fn register(
    State(state): State<AuthState>,
    ctx: RequestContext,
    Form(form): Form<RegisterForm>,
) -> Result<Response, HttpError> {
    let submitted = form.clone();
    match state.identity.register(form).await {
        Ok(user) => {
            if let Some(admin) = &ctx.user {
                info!(admin = %admin.username, created = %user.username, "Account registered by admin");
            }
            let flash = Flash::success(format!("User '{}' created successfully.", user.username));
            Ok(redirect_with("/", &[state.cookies.flash(&flash)]))
        }
        Err(IdentityError::Invalid(errors)) => {
            let page = RegisterTemplate::new(
                Layout::new(&ctx).with_flash(Flash::error(CORRECT_ERRORS)),
                &submitted.username,
                &submitted.email,
                &submitted.role,
                errors,
            );
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(IdentityError::Domain(e)) => Err(e.into()),
    }
}
