//! Landing page and admin dashboard

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::application::AnalyticsService;
use crate::domain::ReportPeriod;
use crate::interfaces::http::common::HttpError;
use crate::interfaces::http::middleware::RequestContext;
use crate::interfaces::http::views::{DashboardTemplate, HomeTemplate, Layout};

/// `?period=today|month|year`; anything else means `month`.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

impl PeriodQuery {
    pub fn period(&self) -> ReportPeriod {
        ReportPeriod::parse(self.period.as_deref())
    }
}

/// `GET /`: the dashboard for admins, the landing page for everyone else.
pub async fn index(
    State(analytics): State<Arc<AnalyticsService>>,
    ctx: RequestContext,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, HttpError> {
    let layout = Layout::new(&ctx);
    if !ctx.is_admin() {
        return Ok(HomeTemplate { layout }.into_response());
    }

    let report = analytics.dashboard(query.period(), Utc::now()).await?;
    Ok(DashboardTemplate::new(layout, report).into_response())
}
