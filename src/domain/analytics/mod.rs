//! Reporting: period math, metric computations, report types and the
//! aggregate-query interface.

pub mod metrics;
pub mod model;
pub mod period;
pub mod repository;

pub use model::{
    DashboardReport, EngagementSource, RankedCount, RequestKind, SupportMetrics, UserDuration,
    VendorEngagement, VendorSegment, VendorSessionSummary,
};
pub use period::{CalendarWindows, ReportPeriod, TimeRange};
pub use repository::AnalyticsRepository;
