//! Grouped-count queries backing the dashboard and the product views.

use async_trait::async_trait;
use sea_orm::sea_query::{Asterisk, Expr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::domain::analytics::{
    AnalyticsRepository, EngagementSource, RankedCount, RequestKind, TimeRange,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{
    attachment_download_log, order_product_online, product, product_category, request_log,
    request_type, search_product, wishlist,
};

pub struct SeaOrmAnalyticsRepository {
    db: DatabaseConnection,
}

impl SeaOrmAnalyticsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct LabelCountRow {
    label: String,
    count: i64,
}

impl From<LabelCountRow> for RankedCount {
    fn from(row: LabelCountRow) -> Self {
        RankedCount::new(row.label, row.count.max(0) as u64)
    }
}

impl SeaOrmAnalyticsRepository {
    /// Group `query` by `label`, count rows per group, order by count
    /// descending then label, and keep `limit` groups.
    async fn rank_by<E, L>(
        &self,
        query: Select<E>,
        label: L,
        limit: u64,
    ) -> DomainResult<Vec<RankedCount>>
    where
        E: EntityTrait,
        L: ColumnTrait + Copy,
    {
        let rows = query
            .select_only()
            .column_as(label, "label")
            .column_as(Expr::col(Asterisk).count(), "count")
            .group_by(label)
            .order_by_desc(Expr::col(Asterisk).count())
            .order_by_asc(label)
            .limit(limit)
            .into_model::<LabelCountRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(RankedCount::from).collect())
    }

    /// Product ids with the most rows in `E`, ties broken by id.
    async fn top_ids<E, C>(&self, product_col: C, limit: u64) -> DomainResult<Vec<i32>>
    where
        E: EntityTrait,
        C: ColumnTrait + Copy,
    {
        let rows: Vec<(i32, i64)> = E::find()
            .select_only()
            .column(product_col)
            .column_as(Expr::col(Asterisk).count(), "count")
            .group_by(product_col)
            .order_by_desc(Expr::col(Asterisk).count())
            .order_by_asc(product_col)
            .limit(limit)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|(id, _)| id).collect())
    }

    fn requests_of(kind: RequestKind, range: TimeRange) -> Select<request_log::Entity> {
        request_log::Entity::find()
            .join(JoinType::InnerJoin, request_log::Relation::RequestType.def())
            .filter(request_type::Column::Name.eq(kind.type_name()))
            .filter(request_log::Column::Date.gte(range.start))
            .filter(request_log::Column::Date.lt(range.end))
    }
}

#[async_trait]
impl AnalyticsRepository for SeaOrmAnalyticsRepository {
    async fn top_searched_products(
        &self,
        range: Option<TimeRange>,
        limit: u64,
    ) -> DomainResult<Vec<RankedCount>> {
        let mut query = search_product::Entity::find()
            .join(JoinType::InnerJoin, search_product::Relation::Product.def());
        if let Some(range) = range {
            query = query
                .filter(search_product::Column::Date.gte(range.start))
                .filter(search_product::Column::Date.lt(range.end));
        }
        self.rank_by(query, product::Column::Name, limit).await
    }

    async fn top_ordered_products(
        &self,
        range: Option<TimeRange>,
        limit: u64,
    ) -> DomainResult<Vec<RankedCount>> {
        let mut query = order_product_online::Entity::find()
            .join(JoinType::InnerJoin, order_product_online::Relation::Product.def());
        if let Some(range) = range {
            query = query
                .filter(order_product_online::Column::OrderDate.gte(range.start))
                .filter(order_product_online::Column::OrderDate.lt(range.end));
        }
        self.rank_by(query, product::Column::Name, limit).await
    }

    async fn top_wishlisted_products(&self, limit: u64) -> DomainResult<Vec<RankedCount>> {
        let query = wishlist::Entity::find()
            .join(JoinType::InnerJoin, wishlist::Relation::Product.def())
            .filter(wishlist::Column::IsActive.eq(true));
        self.rank_by(query, product::Column::Name, limit).await
    }

    async fn top_searched_categories(&self, limit: u64) -> DomainResult<Vec<RankedCount>> {
        let query = search_product::Entity::find()
            .join(JoinType::InnerJoin, search_product::Relation::Product.def())
            .join(JoinType::InnerJoin, product::Relation::Category.def());
        self.rank_by(query, product_category::Column::Name, limit).await
    }

    async fn top_downloaded_products(&self, limit: u64) -> DomainResult<Vec<RankedCount>> {
        let query = attachment_download_log::Entity::find()
            .join(JoinType::InnerJoin, attachment_download_log::Relation::Product.def());
        self.rank_by(query, product::Column::Name, limit).await
    }

    async fn top_requested_products(&self, limit: u64) -> DomainResult<Vec<RankedCount>> {
        let query = request_log::Entity::find()
            .join(JoinType::InnerJoin, request_log::Relation::Product.def());
        self.rank_by(query, product::Column::Name, limit).await
    }

    async fn top_product_ids(&self, source: EngagementSource, limit: u64) -> DomainResult<Vec<i32>> {
        match source {
            EngagementSource::Search => {
                self.top_ids::<search_product::Entity, _>(search_product::Column::ProductId, limit)
                    .await
            }
            EngagementSource::Download => {
                self.top_ids::<attachment_download_log::Entity, _>(
                    attachment_download_log::Column::ProductId,
                    limit,
                )
                .await
            }
            EngagementSource::Request => {
                self.top_ids::<request_log::Entity, _>(request_log::Column::ProductId, limit)
                    .await
            }
        }
    }

    async fn count_requests(&self, kind: RequestKind, range: TimeRange) -> DomainResult<u64> {
        Ok(Self::requests_of(kind, range).count(&self.db).await?)
    }

    async fn top_request_names(
        &self,
        kind: RequestKind,
        range: TimeRange,
        limit: u64,
    ) -> DomainResult<Vec<RankedCount>> {
        self.rank_by(Self::requests_of(kind, range), request_log::Column::Name, limit)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::entities::user;
    use crate::infrastructure::database::test_support::*;

    async fn catalog(db: &DatabaseConnection) -> (i32, i32) {
        let cat = insert_category(db, "Imaging").await;
        let widget = insert_product(db, cat, "Widget").await;
        let gadget = insert_product(db, cat, "Gadget").await;
        (widget, gadget)
    }

    fn october() -> TimeRange {
        TimeRange {
            start: at(2026, 10, 1, 0, 0),
            end: at(2026, 11, 1, 0, 0),
        }
    }

    #[tokio::test]
    async fn searched_products_rank_by_count() {
        let db = memory_db().await;
        let (widget, gadget) = catalog(&db).await;
        for _ in 0..3 {
            insert_search(&db, widget, at(2026, 10, 17, 9, 0)).await;
        }
        insert_search(&db, gadget, at(2026, 10, 17, 9, 0)).await;
        insert_search(&db, gadget, at(2026, 9, 2, 9, 0)).await;
        let repo = SeaOrmAnalyticsRepository::new(db);

        let all = repo.top_searched_products(None, 5).await.unwrap();
        assert_eq!(
            all,
            vec![RankedCount::new("Widget", 3), RankedCount::new("Gadget", 2)]
        );

        let in_month = repo.top_searched_products(Some(october()), 5).await.unwrap();
        assert_eq!(
            in_month,
            vec![RankedCount::new("Widget", 3), RankedCount::new("Gadget", 1)]
        );

        let top_one = repo.top_searched_products(None, 1).await.unwrap();
        assert_eq!(top_one.len(), 1);

        let cats = repo.top_searched_categories(5).await.unwrap();
        assert_eq!(cats, vec![RankedCount::new("Imaging", 5)]);
    }

    #[tokio::test]
    async fn ties_are_ordered_by_label() {
        let db = memory_db().await;
        let (widget, gadget) = catalog(&db).await;
        insert_download(&db, widget).await;
        insert_download(&db, gadget).await;
        let repo = SeaOrmAnalyticsRepository::new(db);

        let rows = repo.top_downloaded_products(5).await.unwrap();
        assert_eq!(
            rows,
            vec![RankedCount::new("Gadget", 1), RankedCount::new("Widget", 1)]
        );
    }

    #[tokio::test]
    async fn orders_and_wishlists() {
        let db = memory_db().await;
        let (widget, gadget) = catalog(&db).await;
        let ann = insert_user(&db, "ann", user::UserRole::Vendor, at(2026, 1, 1, 0, 0)).await;
        insert_order(&db, &ann, gadget, at(2026, 10, 3, 12, 0)).await;
        insert_order(&db, &ann, gadget, at(2026, 10, 4, 12, 0)).await;
        insert_order(&db, &ann, widget, at(2025, 10, 4, 12, 0)).await;
        insert_wishlist(&db, &ann, widget, true).await;
        insert_wishlist(&db, &ann, gadget, false).await;
        let repo = SeaOrmAnalyticsRepository::new(db);

        let ordered = repo.top_ordered_products(Some(october()), 5).await.unwrap();
        assert_eq!(ordered, vec![RankedCount::new("Gadget", 2)]);

        let wished = repo.top_wishlisted_products(5).await.unwrap();
        assert_eq!(wished, vec![RankedCount::new("Widget", 1)]);
    }

    #[tokio::test]
    async fn requests_by_kind_and_range() {
        let db = memory_db().await;
        let (widget, gadget) = catalog(&db).await;
        insert_request(&db, widget, "Support", "Battery drain", at(2026, 10, 2, 9, 0)).await;
        insert_request(&db, widget, "Support", "Battery drain", at(2026, 10, 5, 9, 0)).await;
        insert_request(&db, gadget, "Support", "Screen flicker", at(2026, 10, 6, 9, 0)).await;
        insert_request(&db, gadget, "Support", "Old issue", at(2026, 8, 6, 9, 0)).await;
        insert_request(&db, gadget, "Demo", "Demo please", at(2026, 10, 6, 9, 0)).await;
        let repo = SeaOrmAnalyticsRepository::new(db);

        assert_eq!(repo.count_requests(RequestKind::Support, october()).await.unwrap(), 3);
        assert_eq!(repo.count_requests(RequestKind::Demo, october()).await.unwrap(), 1);
        assert_eq!(repo.count_requests(RequestKind::Training, october()).await.unwrap(), 0);

        let issues = repo
            .top_request_names(RequestKind::Support, october(), 5)
            .await
            .unwrap();
        assert_eq!(
            issues,
            vec![
                RankedCount::new("Battery drain", 2),
                RankedCount::new("Screen flicker", 1)
            ]
        );

        let requested = repo.top_requested_products(5).await.unwrap();
        assert_eq!(
            requested,
            vec![RankedCount::new("Gadget", 3), RankedCount::new("Widget", 2)]
        );
    }

    #[tokio::test]
    async fn top_ids_per_source() {
        let db = memory_db().await;
        let (widget, gadget) = catalog(&db).await;
        insert_search(&db, gadget, at(2026, 10, 1, 0, 0)).await;
        insert_search(&db, gadget, at(2026, 10, 1, 0, 0)).await;
        insert_search(&db, widget, at(2026, 10, 1, 0, 0)).await;
        insert_download(&db, widget).await;
        let repo = SeaOrmAnalyticsRepository::new(db);

        let searched = repo.top_product_ids(EngagementSource::Search, 1).await.unwrap();
        assert_eq!(searched, vec![gadget]);
        let downloaded = repo.top_product_ids(EngagementSource::Download, 5).await.unwrap();
        assert_eq!(downloaded, vec![widget]);
        let requested = repo.top_product_ids(EngagementSource::Request, 5).await.unwrap();
        assert!(requested.is_empty());
    }
}
