//! Page templates
//!
//! Every page extends `base.html`, which reads the navigation state and the
//! pending flash from the `layout` field. Values are formatted here so the
//! templates stay free of logic.

use askama::Template;
use askama_web::WebTemplate;

use crate::application::FormErrors;
use crate::domain::analytics::{
    DashboardReport, SupportMetrics, UserDuration, VendorEngagement, VendorSegment,
    VendorSessionSummary,
};
use crate::domain::{Product, RankedCount, ReportPeriod, User, UserRole};
use crate::interfaces::http::common::Flash;
use crate::interfaces::http::middleware::RequestContext;

/// Shared page chrome: who is signed in and the flash to show.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub username: Option<String>,
    pub is_admin: bool,
    pub flash: Option<Flash>,
}

impl Layout {
    pub fn new(ctx: &RequestContext) -> Self {
        Self {
            username: ctx.user.as_ref().map(|u| u.username.clone()),
            is_admin: ctx.is_admin(),
            flash: ctx.flash.clone(),
        }
    }

    /// Replace the pending flash with one raised while rendering this page.
    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }
}

#[derive(Debug, Clone)]
pub struct PeriodOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn period_options(current: ReportPeriod) -> Vec<PeriodOption> {
    ReportPeriod::all()
        .into_iter()
        .map(|p| PeriodOption {
            value: p.as_str(),
            label: p.label(),
            selected: p == current,
        })
        .collect()
}

fn minutes_text(value: f64) -> String {
    format!("{:.2}", value)
}

// ── Accounts ────────────────────────────────────────────────────

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
}

#[derive(Template, WebTemplate)]
#[template(path = "accounts/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub username: String,
    pub errors: FormErrors,
}

#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "accounts/register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub username: String,
    pub email: String,
    pub roles: Vec<RoleOption>,
    pub errors: FormErrors,
}

impl RegisterTemplate {
    /// Re-display a submission. Passwords are never echoed back.
    pub fn new(layout: Layout, username: &str, email: &str, role: &str, errors: FormErrors) -> Self {
        let selected = UserRole::parse(role).unwrap_or_default();
        let roles = UserRole::all()
            .into_iter()
            .map(|r| RoleOption {
                value: r.as_str(),
                label: r.label(),
                selected: r == selected,
            })
            .collect();
        Self {
            layout,
            username: username.to_string(),
            email: email.to_string(),
            roles,
            errors,
        }
    }
}

// ── Dashboard ───────────────────────────────────────────────────

/// One counter on the dashboard, optionally linking to the list behind it.
#[derive(Debug, Clone)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub link: Option<&'static str>,
}

impl MetricCard {
    fn count(segment: VendorSegment, value: u64) -> Self {
        Self {
            label: segment.title(),
            value: value.to_string(),
            link: Some(segment.path()),
        }
    }
}

fn engagement_cards(e: &VendorEngagement) -> Vec<MetricCard> {
    vec![
        MetricCard::count(VendorSegment::All, e.total_vendors),
        MetricCard::count(VendorSegment::ActiveLast30Days, e.active_last_30_days),
        MetricCard::count(VendorSegment::LoggedInAtLeastOnce, e.logged_in_at_least_once),
        MetricCard::count(VendorSegment::NewThisWeek, e.new_this_week),
        MetricCard::count(VendorSegment::NewThisMonth, e.new_this_month),
        MetricCard::count(VendorSegment::DailyActive, e.daily_active),
        MetricCard::count(VendorSegment::WeeklyActive, e.weekly_active),
        MetricCard::count(VendorSegment::MonthlyActive, e.monthly_active),
        MetricCard::count(VendorSegment::Dormant, e.dormant),
        MetricCard {
            label: "Week-over-Week Retention",
            value: format!("{:.2}%", e.retention_rate),
            link: None,
        },
        MetricCard {
            label: "Average Session Duration (minutes)",
            value: minutes_text(e.avg_session_minutes),
            link: Some("/analytics/avg-session/"),
        },
    ]
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub period_label: &'static str,
    pub periods: Vec<PeriodOption>,
    pub top_searched: Vec<RankedCount>,
    pub top_ordered: Vec<RankedCount>,
    pub top_users: Vec<UserDuration>,
    pub top_wishlisted: Vec<RankedCount>,
    pub cards: Vec<MetricCard>,
}

impl DashboardTemplate {
    pub fn new(layout: Layout, report: DashboardReport) -> Self {
        Self {
            layout,
            period_label: report.period.label(),
            periods: period_options(report.period),
            cards: engagement_cards(&report.engagement),
            top_searched: report.top_searched,
            top_ordered: report.top_ordered,
            top_users: report.top_users,
            top_wishlisted: report.top_wishlisted,
        }
    }
}

// ── Vendor lists ────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct VendorRow {
    pub username: String,
    pub email: String,
    pub date_joined: String,
    pub last_login: String,
    pub is_active: bool,
}

impl From<User> for VendorRow {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            date_joined: user.date_joined.format("%Y-%m-%d %H:%M").to_string(),
            last_login: user
                .last_login_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "Never".to_string()),
            is_active: user.is_active,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "analytics/vendor_list.html")]
pub struct VendorListTemplate {
    pub layout: Layout,
    pub title: &'static str,
    pub vendors: Vec<VendorRow>,
}

#[derive(Debug, Clone)]
pub struct SessionRow {
    pub username: String,
    pub email: String,
    pub total_sessions: u64,
    pub total_minutes: String,
    pub avg_minutes: String,
}

impl From<VendorSessionSummary> for SessionRow {
    fn from(s: VendorSessionSummary) -> Self {
        Self {
            username: s.username,
            email: s.email,
            total_sessions: s.total_sessions,
            total_minutes: minutes_text(s.total_minutes),
            avg_minutes: minutes_text(s.avg_minutes),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "analytics/avg_session.html")]
pub struct AvgSessionTemplate {
    pub layout: Layout,
    pub rows: Vec<SessionRow>,
}

// ── Product and support analytics ───────────────────────────────

/// A grouped-count ranking: one label column and a count column.
#[derive(Template, WebTemplate)]
#[template(path = "analytics/ranked.html")]
pub struct RankedTemplate {
    pub layout: Layout,
    pub title: &'static str,
    pub label_heading: &'static str,
    pub count_heading: &'static str,
    pub rows: Vec<RankedCount>,
}

#[derive(Template, WebTemplate)]
#[template(path = "analytics/hero_products.html")]
pub struct HeroProductsTemplate {
    pub layout: Layout,
    pub products: Vec<Product>,
}

#[derive(Template, WebTemplate)]
#[template(path = "analytics/support_metrics.html")]
pub struct SupportMetricsTemplate {
    pub layout: Layout,
    pub period_label: &'static str,
    pub periods: Vec<PeriodOption>,
    pub demo_count: u64,
    pub training_count: u64,
    pub support_count: u64,
    pub common_issues: Vec<RankedCount>,
}

impl SupportMetricsTemplate {
    pub fn new(layout: Layout, metrics: SupportMetrics) -> Self {
        Self {
            layout,
            period_label: metrics.period.label(),
            periods: period_options(metrics.period),
            demo_count: metrics.demo_count,
            training_count: metrics.training_count,
            support_count: metrics.support_count,
            common_issues: metrics.common_issues,
        }
    }
}

// ── Errors ──────────────────────────────────────────────────────

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub layout: Layout,
    pub status: u16,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn dashboard_cards_link_to_segment_lists() {
        let engagement = VendorEngagement {
            total_vendors: 4,
            dormant: 1,
            retention_rate: 50.0,
            avg_session_minutes: 45.5,
            ..Default::default()
        };
        let cards = engagement_cards(&engagement);
        assert_eq!(cards[0].value, "4");
        assert_eq!(cards[0].link, Some("/analytics/"));
        assert_eq!(cards[8].label, "Dormant Vendors (Never Logged In)");
        assert_eq!(cards[9].value, "50.00%");
        assert_eq!(cards[10].value, "45.50");
    }

    #[test]
    fn register_page_preselects_role() {
        let page = RegisterTemplate::new(Layout::default(), "ann", "ann@example.com", "admin", FormErrors::default());
        let selected: Vec<_> = page.roles.iter().filter(|r| r.selected).map(|r| r.value).collect();
        assert_eq!(selected, vec!["admin"]);

        let page = RegisterTemplate::new(Layout::default(), "", "", "", FormErrors::default());
        assert!(page.roles.iter().any(|r| r.selected && r.value == "vendor"));
    }

    #[test]
    fn vendor_row_formats_missing_login() {
        let joined = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 0).unwrap();
        let row = VendorRow::from(User {
            id: "1".into(),
            username: "ann".into(),
            email: "ann@example.com".into(),
            password_hash: String::new(),
            role: UserRole::Vendor,
            is_active: true,
            date_joined: joined,
            updated_at: joined,
            last_login_at: None,
        });
        assert_eq!(row.date_joined, "2026-03-04 05:06");
        assert_eq!(row.last_login, "Never");
    }

    #[test]
    fn error_page_renders_reason() {
        let html = ErrorTemplate {
            layout: Layout::default(),
            status: 500,
            reason: "Internal Server Error".into(),
        }
        .render()
        .unwrap();
        assert!(html.contains("500"));
        assert!(html.contains("Internal Server Error"));
    }
}
