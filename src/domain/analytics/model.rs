//! Report value types

use chrono::Duration;
use serde::Serialize;

use super::metrics::format_duration;
use super::period::ReportPeriod;

/// One row of a grouped count: a label (product, category, issue name) and
/// how many events fell under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub label: String,
    pub count: u64,
}

impl RankedCount {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Cumulative closed-session time of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDuration {
    pub username: String,
    pub total: Duration,
}

impl UserDuration {
    /// `H:MM:SS`
    pub fn display(&self) -> String {
        format_duration(self.total)
    }
}

/// Vendor engagement counters shown on the dashboard. None of these depend on
/// the selected [`ReportPeriod`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VendorEngagement {
    pub total_vendors: u64,
    pub active_last_30_days: u64,
    pub logged_in_at_least_once: u64,
    pub new_this_week: u64,
    pub new_this_month: u64,
    pub daily_active: u64,
    pub weekly_active: u64,
    pub monthly_active: u64,
    pub dormant: u64,
    /// Percentage, two decimals.
    pub retention_rate: f64,
    /// Minutes, two decimals.
    pub avg_session_minutes: f64,
}

#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub period: ReportPeriod,
    pub top_searched: Vec<RankedCount>,
    pub top_ordered: Vec<RankedCount>,
    pub top_users: Vec<UserDuration>,
    pub top_wishlisted: Vec<RankedCount>,
    pub engagement: VendorEngagement,
}

/// Per-vendor closed-session summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorSessionSummary {
    pub username: String,
    pub email: String,
    pub total_sessions: u64,
    pub total_minutes: f64,
    pub avg_minutes: f64,
}

#[derive(Debug, Clone)]
pub struct SupportMetrics {
    pub period: ReportPeriod,
    pub demo_count: u64,
    pub training_count: u64,
    pub support_count: u64,
    pub common_issues: Vec<RankedCount>,
}

/// Vendor subsets rendered by the list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorSegment {
    All,
    ActiveLast30Days,
    LoggedInAtLeastOnce,
    NewThisWeek,
    NewThisMonth,
    DailyActive,
    WeeklyActive,
    MonthlyActive,
    Dormant,
}

impl VendorSegment {
    pub fn all() -> [VendorSegment; 9] {
        [
            Self::All,
            Self::ActiveLast30Days,
            Self::LoggedInAtLeastOnce,
            Self::NewThisWeek,
            Self::NewThisMonth,
            Self::DailyActive,
            Self::WeeklyActive,
            Self::MonthlyActive,
            Self::Dormant,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::All => "All Vendors",
            Self::ActiveLast30Days => "Active Vendors (Last 30 Days)",
            Self::LoggedInAtLeastOnce => "Vendors Logged In At Least Once",
            Self::NewThisWeek => "New Vendors This Week",
            Self::NewThisMonth => "New Vendors This Month",
            Self::DailyActive => "Daily Active Vendors (Today)",
            Self::WeeklyActive => "Weekly Active Vendors",
            Self::MonthlyActive => "Monthly Active Vendors",
            Self::Dormant => "Dormant Vendors (Never Logged In)",
        }
    }

    /// Path under `/analytics`.
    pub fn path(&self) -> &'static str {
        match self {
            Self::All => "/analytics/",
            Self::ActiveLast30Days => "/analytics/active/",
            Self::LoggedInAtLeastOnce => "/analytics/logged-in/",
            Self::NewThisWeek => "/analytics/new/week/",
            Self::NewThisMonth => "/analytics/new/month/",
            Self::DailyActive => "/analytics/dau/",
            Self::WeeklyActive => "/analytics/wau/",
            Self::MonthlyActive => "/analytics/mau/",
            Self::Dormant => "/analytics/dormant/",
        }
    }
}

/// Event logs that feed the hero-product union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementSource {
    Search,
    Download,
    Request,
}

impl EngagementSource {
    pub fn all() -> [EngagementSource; 3] {
        [Self::Search, Self::Download, Self::Request]
    }
}

/// Request types tracked by the support metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Demo,
    Training,
    Support,
}

impl RequestKind {
    /// Name stored in the request-type table.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Demo => "Demo",
            Self::Training => "Training",
            Self::Support => "Support",
        }
    }

    pub fn all() -> [RequestKind; 3] {
        [Self::Demo, Self::Training, Self::Support]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn segment_paths_are_unique() {
        let paths: HashSet<_> = VendorSegment::all().iter().map(|s| s.path()).collect();
        assert_eq!(paths.len(), 9);
        assert!(paths.iter().all(|p| p.starts_with("/analytics/")));
    }

    #[test]
    fn ranked_count_serializes_label_and_count() {
        let json = serde_json::to_string(&RankedCount::new("Widget", 3)).unwrap();
        assert_eq!(json, r#"{"label":"Widget","count":3}"#);
    }

    #[test]
    fn user_duration_display() {
        let d = UserDuration {
            username: "ann".into(),
            total: Duration::minutes(95),
        };
        assert_eq!(d.display(), "1:35:00");
    }
}
