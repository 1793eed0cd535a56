use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc, Weekday};
use tracing::debug;

use crate::domain::analytics::metrics::{
    average_session_minutes, retention_rate, top_users_by_duration, vendor_session_summaries,
};
use crate::domain::analytics::{
    CalendarWindows, DashboardReport, EngagementSource, RankedCount, ReportPeriod, RequestKind,
    SupportMetrics, VendorEngagement, VendorSegment, VendorSessionSummary,
};
use crate::domain::{ActivityWindow, DomainResult, Product, RepositoryProvider, User, UserRole};

/// Rows in each dashboard ranking.
pub const DASHBOARD_TOP_N: u64 = 5;
/// Rows in each product / support ranking page.
pub const VIEW_TOP_N: u64 = 10;
/// Product ids taken from each source for the hero union.
pub const HERO_TOP_N: u64 = 5;

pub struct AnalyticsService {
    repos: Arc<dyn RepositoryProvider>,
    first_weekday: Weekday,
}

impl AnalyticsService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, first_weekday: Weekday) -> Self {
        Self {
            repos,
            first_weekday,
        }
    }

    fn windows(&self, now: DateTime<Utc>) -> CalendarWindows {
        CalendarWindows::at(now, self.first_weekday)
    }

    async fn active_vendor_ids(&self, window: ActivityWindow) -> DomainResult<Vec<String>> {
        self.repos
            .activities()
            .distinct_active_users(UserRole::Vendor, window)
            .await
    }

    // ── Dashboard ───────────────────────────────────────────────

    pub async fn dashboard(
        &self,
        period: ReportPeriod,
        now: DateTime<Utc>,
    ) -> DomainResult<DashboardReport> {
        let range = period.range(now);
        let analytics = self.repos.analytics();

        let top_searched = analytics
            .top_searched_products(Some(range), DASHBOARD_TOP_N)
            .await?;
        let top_ordered = analytics
            .top_ordered_products(Some(range), DASHBOARD_TOP_N)
            .await?;

        let sessions = self.repos.activities().closed_sessions(None).await?;
        let top_users = top_users_by_duration(&sessions, DASHBOARD_TOP_N as usize);

        let top_wishlisted = analytics.top_wishlisted_products(DASHBOARD_TOP_N).await?;
        let engagement = self.engagement(now).await?;

        debug!(period = %period, "Dashboard report built");
        Ok(DashboardReport {
            period,
            top_searched,
            top_ordered,
            top_users,
            top_wishlisted,
            engagement,
        })
    }

    /// Vendor engagement counters. Independent of any report period.
    pub async fn engagement(&self, now: DateTime<Utc>) -> DomainResult<VendorEngagement> {
        let w = self.windows(now);
        let users = self.repos.users();

        let total_vendors = users.count_by_role(UserRole::Vendor, None).await?;
        let active_30 = self
            .active_vendor_ids(ActivityWindow::Since(w.thirty_days_ago))
            .await?;
        let ever = self.active_vendor_ids(ActivityWindow::Ever).await?;
        let new_this_week = users
            .count_by_role(UserRole::Vendor, Some(w.week_start_instant()))
            .await?;
        let new_this_month = users
            .count_by_role(UserRole::Vendor, Some(w.month_start_instant()))
            .await?;

        let daily = self.active_vendor_ids(ActivityWindow::On(w.today)).await?;
        let weekly = self
            .active_vendor_ids(ActivityWindow::Since(w.week_start))
            .await?;
        let monthly = self
            .active_vendor_ids(ActivityWindow::Since(w.month_start))
            .await?;

        let dormant = users
            .list_by_role_excluding(UserRole::Vendor, &ever)
            .await?
            .len();

        let this_week = self.active_vendor_ids(w.this_week()).await?;
        let last_week = self.active_vendor_ids(w.last_week()).await?;

        let vendor_sessions = self
            .repos
            .activities()
            .closed_sessions(Some(UserRole::Vendor))
            .await?;

        Ok(VendorEngagement {
            total_vendors,
            active_last_30_days: active_30.len() as u64,
            logged_in_at_least_once: ever.len() as u64,
            new_this_week,
            new_this_month,
            daily_active: daily.len() as u64,
            weekly_active: weekly.len() as u64,
            monthly_active: monthly.len() as u64,
            dormant: dormant as u64,
            retention_rate: retention_rate(&this_week, &last_week),
            avg_session_minutes: average_session_minutes(&vendor_sessions),
        })
    }

    // ── Vendor lists ────────────────────────────────────────────

    /// Vendors in `segment`, ordered by username.
    pub async fn vendor_segment(
        &self,
        segment: VendorSegment,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<User>> {
        let w = self.windows(now);
        let users = self.repos.users();

        match segment {
            VendorSegment::All => users.list_by_role(UserRole::Vendor, None).await,
            VendorSegment::NewThisWeek => {
                users
                    .list_by_role(UserRole::Vendor, Some(w.week_start_instant()))
                    .await
            }
            VendorSegment::NewThisMonth => {
                users
                    .list_by_role(UserRole::Vendor, Some(w.month_start_instant()))
                    .await
            }
            VendorSegment::Dormant => {
                let ever = self.active_vendor_ids(ActivityWindow::Ever).await?;
                users.list_by_role_excluding(UserRole::Vendor, &ever).await
            }
            VendorSegment::ActiveLast30Days => {
                let ids = self.active_vendor_ids(ActivityWindow::Since(w.thirty_days_ago)).await?;
                users.list_by_ids(&ids).await
            }
            VendorSegment::LoggedInAtLeastOnce => {
                let ids = self.active_vendor_ids(ActivityWindow::Ever).await?;
                users.list_by_ids(&ids).await
            }
            VendorSegment::DailyActive => {
                let ids = self.active_vendor_ids(ActivityWindow::On(w.today)).await?;
                users.list_by_ids(&ids).await
            }
            VendorSegment::WeeklyActive => {
                let ids = self.active_vendor_ids(ActivityWindow::Since(w.week_start)).await?;
                users.list_by_ids(&ids).await
            }
            VendorSegment::MonthlyActive => {
                let ids = self.active_vendor_ids(ActivityWindow::Since(w.month_start)).await?;
                users.list_by_ids(&ids).await
            }
        }
    }

    /// Closed-session totals for every vendor that has any.
    pub async fn vendor_sessions(&self) -> DomainResult<Vec<VendorSessionSummary>> {
        let sessions = self
            .repos
            .activities()
            .closed_sessions(Some(UserRole::Vendor))
            .await?;

        let emails: HashMap<String, String> = self
            .repos
            .users()
            .list_by_role(UserRole::Vendor, None)
            .await?
            .into_iter()
            .map(|u| (u.id, u.email))
            .collect();

        Ok(vendor_session_summaries(&sessions, &emails))
    }

    // ── Product and support views ───────────────────────────────

    pub async fn most_viewed_products(&self) -> DomainResult<Vec<RankedCount>> {
        self.repos
            .analytics()
            .top_searched_products(None, VIEW_TOP_N)
            .await
    }

    pub async fn top_categories(&self) -> DomainResult<Vec<RankedCount>> {
        self.repos.analytics().top_searched_categories(VIEW_TOP_N).await
    }

    pub async fn most_downloaded_brochures(&self) -> DomainResult<Vec<RankedCount>> {
        self.repos.analytics().top_downloaded_products(VIEW_TOP_N).await
    }

    pub async fn most_requested_products(&self) -> DomainResult<Vec<RankedCount>> {
        self.repos.analytics().top_requested_products(VIEW_TOP_N).await
    }

    /// Products among the top searched, downloaded or requested, each
    /// product listed once.
    pub async fn hero_products(&self) -> DomainResult<Vec<Product>> {
        let mut ids = BTreeSet::new();
        for source in EngagementSource::all() {
            let top = self
                .repos
                .analytics()
                .top_product_ids(source, HERO_TOP_N)
                .await?;
            ids.extend(top);
        }

        let ids: Vec<i32> = ids.into_iter().collect();
        self.repos.catalog().products_by_ids(&ids).await
    }

    pub async fn support_metrics(
        &self,
        period: ReportPeriod,
        now: DateTime<Utc>,
    ) -> DomainResult<SupportMetrics> {
        let range = period.range(now);
        let analytics = self.repos.analytics();

        let mut counts = [0u64; 3];
        for (slot, kind) in counts.iter_mut().zip(RequestKind::all()) {
            *slot = analytics.count_requests(kind, range).await?;
        }
        let common_issues = analytics
            .top_request_names(RequestKind::Support, range, VIEW_TOP_N)
            .await?;

        Ok(SupportMetrics {
            period,
            demo_count: counts[0],
            training_count: counts[1],
            support_count: counts[2],
            common_issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::entities::user::UserRole as DbRole;
    use crate::infrastructure::database::test_support::*;
    use crate::infrastructure::database::SeaOrmRepositoryProvider;
    use sea_orm::DatabaseConnection;

    // 2026-10-17 is a Saturday; the week starts Monday 2026-10-12.
    fn now() -> DateTime<Utc> {
        at(2026, 10, 17, 12, 0)
    }

    fn service(db: &DatabaseConnection) -> AnalyticsService {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        AnalyticsService::new(repos, Weekday::Mon)
    }

    struct Fixture {
        db: DatabaseConnection,
        ann: String,
        bob: String,
    }

    /// ann: active today and last week; bob: active last week only;
    /// cid: joined this week, never logged in; root: admin, active today.
    async fn fixture() -> Fixture {
        let db = memory_db().await;
        let root = insert_user(&db, "root", DbRole::Admin, at(2025, 1, 1, 0, 0)).await;
        let ann = insert_user(&db, "ann", DbRole::Vendor, at(2025, 6, 1, 0, 0)).await;
        let bob = insert_user(&db, "bob", DbRole::Vendor, at(2026, 10, 2, 0, 0)).await;
        insert_user(&db, "cid", DbRole::Vendor, at(2026, 10, 13, 0, 0)).await;

        insert_session(&db, &root, date(2026, 10, 17), time(8, 0), Some(time(12, 0))).await;
        insert_session(&db, &ann, date(2026, 10, 17), time(9, 0), Some(time(9, 40))).await;
        insert_session(&db, &ann, date(2026, 10, 6), time(9, 0), Some(time(9, 20))).await;
        insert_session(&db, &bob, date(2026, 10, 7), time(10, 0), Some(time(10, 30))).await;
        insert_session(&db, &bob, date(2026, 10, 8), time(10, 0), None).await;

        Fixture { db, ann, bob }
    }

    #[tokio::test]
    async fn engagement_counters() {
        let f = fixture().await;
        let e = service(&f.db).engagement(now()).await.unwrap();

        assert_eq!(e.total_vendors, 3);
        assert_eq!(e.logged_in_at_least_once, 2);
        assert_eq!(e.dormant, 1);
        assert_eq!(e.dormant + e.logged_in_at_least_once, e.total_vendors);
        assert_eq!(e.active_last_30_days, 2);
        assert_eq!(e.new_this_week, 1);
        assert_eq!(e.new_this_month, 2);
        assert_eq!(e.daily_active, 1);
        assert_eq!(e.weekly_active, 1);
        assert_eq!(e.monthly_active, 2);
        // last week {ann, bob}, this week {ann}
        assert_eq!(e.retention_rate, 50.0);
        // ann 60 minutes, bob 30 minutes
        assert_eq!(e.avg_session_minutes, 45.0);
    }

    #[tokio::test]
    async fn empty_store_has_zero_metrics() {
        let db = memory_db().await;
        let e = service(&db).engagement(now()).await.unwrap();
        assert_eq!(e, VendorEngagement::default());
    }

    #[tokio::test]
    async fn dashboard_rankings() {
        let f = fixture().await;
        let cat = insert_category(&f.db, "Imaging").await;
        let widget = insert_product(&f.db, cat, "Widget").await;
        let gadget = insert_product(&f.db, cat, "Gadget").await;
        for _ in 0..3 {
            insert_search(&f.db, widget, at(2026, 10, 3, 9, 0)).await;
        }
        insert_search(&f.db, gadget, at(2026, 10, 16, 9, 0)).await;
        insert_search(&f.db, gadget, at(2026, 9, 16, 9, 0)).await;
        insert_order(&f.db, &f.ann, gadget, at(2026, 10, 17, 10, 0)).await;
        insert_wishlist(&f.db, &f.bob, widget, true).await;

        let report = service(&f.db)
            .dashboard(ReportPeriod::Month, now())
            .await
            .unwrap();
        assert_eq!(
            report.top_searched,
            vec![RankedCount::new("Widget", 3), RankedCount::new("Gadget", 1)]
        );
        assert_eq!(report.top_ordered, vec![RankedCount::new("Gadget", 1)]);
        assert_eq!(report.top_wishlisted, vec![RankedCount::new("Widget", 1)]);

        // root's four hours beat every vendor
        assert_eq!(report.top_users[0].username, "root");
        assert_eq!(report.top_users[0].display(), "4:00:00");
        assert_eq!(report.top_users[1].username, "ann");

        let today = service(&f.db)
            .dashboard(ReportPeriod::Today, now())
            .await
            .unwrap();
        assert!(today.top_searched.is_empty());
        assert_eq!(today.top_ordered.len(), 1);
    }

    #[tokio::test]
    async fn segments_list_expected_vendors() {
        let f = fixture().await;
        let svc = service(&f.db);
        let names = |users: Vec<User>| users.into_iter().map(|u| u.username).collect::<Vec<_>>();

        let cases = [
            (VendorSegment::All, vec!["ann", "bob", "cid"]),
            (VendorSegment::ActiveLast30Days, vec!["ann", "bob"]),
            (VendorSegment::LoggedInAtLeastOnce, vec!["ann", "bob"]),
            (VendorSegment::NewThisWeek, vec!["cid"]),
            (VendorSegment::NewThisMonth, vec!["bob", "cid"]),
            (VendorSegment::DailyActive, vec!["ann"]),
            (VendorSegment::WeeklyActive, vec!["ann"]),
            (VendorSegment::MonthlyActive, vec!["ann", "bob"]),
            (VendorSegment::Dormant, vec!["cid"]),
        ];
        for (segment, expected) in cases {
            let got = names(svc.vendor_segment(segment, now()).await.unwrap());
            assert_eq!(got, expected, "{}", segment.title());
        }
    }

    #[tokio::test]
    async fn vendor_session_summaries_exclude_admins() {
        let f = fixture().await;
        let rows = service(&f.db).vendor_sessions().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].username, "ann");
        assert_eq!(rows[0].email, "ann@example.com");
        assert_eq!(rows[0].total_sessions, 2);
        assert_eq!(rows[0].total_minutes, 60.0);
        assert_eq!(rows[0].avg_minutes, 30.0);
        assert_eq!(rows[1].username, "bob");
        assert_eq!(rows[1].total_sessions, 1);
    }

    #[tokio::test]
    async fn hero_products_are_deduplicated() {
        let db = memory_db().await;
        let cat = insert_category(&db, "Imaging").await;
        let widget = insert_product(&db, cat, "Widget").await;
        let gadget = insert_product(&db, cat, "Gadget").await;
        insert_product(&db, cat, "Unused").await;
        insert_search(&db, widget, at(2026, 10, 1, 0, 0)).await;
        insert_download(&db, widget).await;
        insert_request(&db, gadget, "Demo", "Demo", at(2026, 10, 1, 0, 0)).await;
        insert_request(&db, widget, "Support", "Broken", at(2026, 10, 1, 0, 0)).await;

        let heroes = service(&db).hero_products().await.unwrap();
        let names: Vec<_> = heroes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Gadget", "Widget"]);
    }

    #[tokio::test]
    async fn support_metrics_by_period() {
        let db = memory_db().await;
        let cat = insert_category(&db, "Imaging").await;
        let widget = insert_product(&db, cat, "Widget").await;
        insert_request(&db, widget, "Demo", "Demo", at(2026, 10, 17, 8, 0)).await;
        insert_request(&db, widget, "Training", "Onboarding", at(2026, 10, 3, 8, 0)).await;
        insert_request(&db, widget, "Support", "Battery", at(2026, 10, 17, 9, 0)).await;
        insert_request(&db, widget, "Support", "Battery", at(2026, 10, 10, 9, 0)).await;
        insert_request(&db, widget, "Support", "Screen", at(2026, 3, 10, 9, 0)).await;
        let svc = service(&db);

        let month = svc.support_metrics(ReportPeriod::Month, now()).await.unwrap();
        assert_eq!(month.demo_count, 1);
        assert_eq!(month.training_count, 1);
        assert_eq!(month.support_count, 2);
        assert_eq!(month.common_issues, vec![RankedCount::new("Battery", 2)]);

        let today = svc.support_metrics(ReportPeriod::Today, now()).await.unwrap();
        assert_eq!(today.training_count, 0);
        assert_eq!(today.support_count, 1);

        let year = svc.support_metrics(ReportPeriod::Year, now()).await.unwrap();
        assert_eq!(year.support_count, 3);
        assert_eq!(
            year.common_issues,
            vec![RankedCount::new("Battery", 2), RankedCount::new("Screen", 1)]
        );
    }
}
