//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::activity::ActivityRepository;
use crate::domain::analytics::AnalyticsRepository;
use crate::domain::catalog::CatalogRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepositoryInterface;

use super::activity_repository::SeaOrmActivityRepository;
use super::analytics_repository::SeaOrmAnalyticsRepository;
use super::catalog_repository::SeaOrmCatalogRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let admin = repos.users().get_user_by_username("admin").await?;
/// let top = repos.analytics().top_searched_products(None, 5).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    activities: SeaOrmActivityRepository,
    catalog: SeaOrmCatalogRepository,
    analytics: SeaOrmAnalyticsRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            activities: SeaOrmActivityRepository::new(db.clone()),
            catalog: SeaOrmCatalogRepository::new(db.clone()),
            analytics: SeaOrmAnalyticsRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn activities(&self) -> &dyn ActivityRepository {
        &self.activities
    }

    fn catalog(&self) -> &dyn CatalogRepository {
        &self.catalog
    }

    fn analytics(&self) -> &dyn AnalyticsRepository {
        &self.analytics
    }
}
