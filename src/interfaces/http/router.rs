//! Page router

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{FromRef, State},
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use crate::application::{AnalyticsService, IdentityService};
use crate::domain::analytics::VendorSegment;
use crate::interfaces::http::common::CookieSettings;
use crate::interfaces::http::middleware::{
    require_admin, session_middleware, RequestContext, SessionState,
};
use crate::interfaces::http::modules::auth::AuthState;
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::{analytics, auth, dashboard, health};

/// Shared state for every route. Handlers extract their own slice via
/// `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub analytics: Arc<AnalyticsService>,
    pub db: DatabaseConnection,
    pub cookies: CookieSettings,
    pub started_at: Arc<Instant>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for Arc<AnalyticsService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.analytics)
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            identity: Arc::clone(&s.identity),
            cookies: s.cookies,
        }
    }
}

impl FromRef<AppState> for SessionState {
    fn from_ref(s: &AppState) -> Self {
        SessionState {
            identity: Arc::clone(&s.identity),
            cookies: s.cookies,
        }
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// Routes that only admins may open.
fn admin_routes(session: SessionState) -> Router<AppState> {
    let mut router = Router::new()
        .route(
            "/accounts/register",
            get(auth::register_page).post(auth::register),
        )
        .route("/analytics/avg-session/", get(analytics::avg_session))
        .route(
            "/analytics/products/most-viewed/",
            get(analytics::most_viewed_products),
        )
        .route("/analytics/categories/top/", get(analytics::top_categories))
        .route(
            "/analytics/brochures/most-downloaded/",
            get(analytics::most_downloaded_brochures),
        )
        .route(
            "/analytics/products/most-requested/",
            get(analytics::most_requested_products),
        )
        .route("/analytics/products/hero/", get(analytics::hero_products))
        .route("/analytics/support/", get(analytics::support_metrics));

    for segment in VendorSegment::all() {
        router = router.route(
            segment.path(),
            get(
                move |State(svc): State<Arc<AnalyticsService>>, ctx: RequestContext| {
                    analytics::vendor_list(svc, ctx, segment)
                },
            ),
        );
    }

    router.route_layer(middleware::from_fn_with_state(session, require_admin))
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let session = SessionState::from_ref(&state);

    Router::new()
        .route("/", get(dashboard::index))
        .route("/accounts/login", get(auth::login_page).post(auth::login))
        .route("/accounts/logout", post(auth::logout))
        .route("/health", get(health::health_check))
        .merge(admin_routes(session.clone()))
        .layer(middleware::from_fn_with_state(session, session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
