//! Error responses for page handlers

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::domain::DomainError;
use crate::interfaces::http::views::{ErrorTemplate, Layout};

/// Failure of a page handler that cannot be shown inline.
///
/// Form problems never reach this type; they are re-rendered by the
/// handler that owns the form.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl HttpError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Domain(DomainError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            Self::Domain(DomainError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let page = ErrorTemplate {
            layout: Layout::default(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_string(),
        };
        (status, page).into_response()
    }
}
