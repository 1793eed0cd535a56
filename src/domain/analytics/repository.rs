use async_trait::async_trait;

use super::model::{EngagementSource, RankedCount, RequestKind};
use super::period::TimeRange;
use crate::domain::DomainResult;

/// Grouped-count queries over the event logs.
///
/// Every ranking is ordered by count descending, then label ascending, and
/// truncated to `limit` rows.
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Search events per product name, optionally inside `range`.
    async fn top_searched_products(
        &self,
        range: Option<TimeRange>,
        limit: u64,
    ) -> DomainResult<Vec<RankedCount>>;

    /// Orders per product name, optionally inside `range` (by order date).
    async fn top_ordered_products(
        &self,
        range: Option<TimeRange>,
        limit: u64,
    ) -> DomainResult<Vec<RankedCount>>;

    /// Active wishlist entries per product name.
    async fn top_wishlisted_products(&self, limit: u64) -> DomainResult<Vec<RankedCount>>;

    /// Search events per product category name.
    async fn top_searched_categories(&self, limit: u64) -> DomainResult<Vec<RankedCount>>;

    /// Brochure downloads per product name.
    async fn top_downloaded_products(&self, limit: u64) -> DomainResult<Vec<RankedCount>>;

    /// Requests of any type per product name.
    async fn top_requested_products(&self, limit: u64) -> DomainResult<Vec<RankedCount>>;

    /// Product ids with the most events in `source`.
    async fn top_product_ids(&self, source: EngagementSource, limit: u64) -> DomainResult<Vec<i32>>;

    /// Requests of `kind` dated inside `range`.
    async fn count_requests(&self, kind: RequestKind, range: TimeRange) -> DomainResult<u64>;

    /// Requests of `kind` inside `range` grouped by their free-text name.
    async fn top_request_names(
        &self,
        kind: RequestKind,
        range: TimeRange,
        limit: u64,
    ) -> DomainResult<Vec<RankedCount>>;
}
