//! Repository access for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::activity::ActivityRepository;
use super::analytics::AnalyticsRepository;
use super::catalog::CatalogRepository;
use super::user::UserRepositoryInterface;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let admin = repos.users().get_user_by_username("admin").await?;
///     let dau = repos.activities().distinct_active_users(UserRole::Vendor, window).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepositoryInterface;
    fn activities(&self) -> &dyn ActivityRepository;
    fn catalog(&self) -> &dyn CatalogRepository;
    fn analytics(&self) -> &dyn AnalyticsRepository;
}
