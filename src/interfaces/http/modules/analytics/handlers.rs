//! Analytics page handlers
//!
//! All routes here sit behind the admin guard.

use std::sync::Arc;

use axum::extract::{Query, State};
use chrono::Utc;

use crate::application::AnalyticsService;
use crate::domain::analytics::VendorSegment;
use crate::interfaces::http::common::HttpError;
use crate::interfaces::http::middleware::RequestContext;
use crate::interfaces::http::modules::dashboard::PeriodQuery;
use crate::interfaces::http::views::{
    AvgSessionTemplate, HeroProductsTemplate, Layout, RankedTemplate, SupportMetricsTemplate,
    VendorListTemplate,
};

type Analytics = State<Arc<AnalyticsService>>;

// ── Vendor lists ────────────────────────────────────────────────

/// One of the nine vendor lists, all rendered through the same template.
pub async fn vendor_list(
    analytics: Arc<AnalyticsService>,
    ctx: RequestContext,
    segment: VendorSegment,
) -> Result<VendorListTemplate, HttpError> {
    let vendors = analytics.vendor_segment(segment, Utc::now()).await?;
    Ok(VendorListTemplate {
        layout: Layout::new(&ctx),
        title: segment.title(),
        vendors: vendors.into_iter().map(Into::into).collect(),
    })
}

pub async fn avg_session(
    State(analytics): Analytics,
    ctx: RequestContext,
) -> Result<AvgSessionTemplate, HttpError> {
    let rows = analytics.vendor_sessions().await?;
    Ok(AvgSessionTemplate {
        layout: Layout::new(&ctx),
        rows: rows.into_iter().map(Into::into).collect(),
    })
}

// ── Products ────────────────────────────────────────────────────

pub async fn most_viewed_products(
    State(analytics): Analytics,
    ctx: RequestContext,
) -> Result<RankedTemplate, HttpError> {
    Ok(RankedTemplate {
        layout: Layout::new(&ctx),
        title: "Most Viewed Products",
        label_heading: "Product",
        count_heading: "Searches",
        rows: analytics.most_viewed_products().await?,
    })
}

pub async fn top_categories(
    State(analytics): Analytics,
    ctx: RequestContext,
) -> Result<RankedTemplate, HttpError> {
    Ok(RankedTemplate {
        layout: Layout::new(&ctx),
        title: "Top Categories",
        label_heading: "Category",
        count_heading: "Searches",
        rows: analytics.top_categories().await?,
    })
}

pub async fn most_downloaded_brochures(
    State(analytics): Analytics,
    ctx: RequestContext,
) -> Result<RankedTemplate, HttpError> {
    Ok(RankedTemplate {
        layout: Layout::new(&ctx),
        title: "Most Downloaded Brochures",
        label_heading: "Product",
        count_heading: "Downloads",
        rows: analytics.most_downloaded_brochures().await?,
    })
}

pub async fn most_requested_products(
    State(analytics): Analytics,
    ctx: RequestContext,
) -> Result<RankedTemplate, HttpError> {
    Ok(RankedTemplate {
        layout: Layout::new(&ctx),
        title: "Most Requested Products",
        label_heading: "Product",
        count_heading: "Requests",
        rows: analytics.most_requested_products().await?,
    })
}

pub async fn hero_products(
    State(analytics): Analytics,
    ctx: RequestContext,
) -> Result<HeroProductsTemplate, HttpError> {
    Ok(HeroProductsTemplate {
        layout: Layout::new(&ctx),
        products: analytics.hero_products().await?,
    })
}

// ── Support ─────────────────────────────────────────────────────

pub async fn support_metrics(
    State(analytics): Analytics,
    ctx: RequestContext,
    Query(query): Query<PeriodQuery>,
) -> Result<SupportMetricsTemplate, HttpError> {
    let metrics = analytics.support_metrics(query.period(), Utc::now()).await?;
    Ok(SupportMetricsTemplate::new(Layout::new(&ctx), metrics))
}
