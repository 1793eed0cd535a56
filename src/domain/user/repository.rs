use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CreateUserDto, User, UserRole};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn count_users(&self) -> DomainResult<u64>;

    /// Count users of `role`, optionally only those who joined at or after `joined_since`.
    async fn count_by_role(
        &self,
        role: UserRole,
        joined_since: Option<DateTime<Utc>>,
    ) -> DomainResult<u64>;

    /// Users of `role` ordered by username, optionally only those who joined
    /// at or after `joined_since`.
    async fn list_by_role(
        &self,
        role: UserRole,
        joined_since: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<User>>;

    async fn list_by_ids(&self, ids: &[String]) -> DomainResult<Vec<User>>;

    /// Users of `role` whose id is not in `excluded`, ordered by username.
    async fn list_by_role_excluding(
        &self,
        role: UserRole,
        excluded: &[String],
    ) -> DomainResult<Vec<User>>;

    async fn update_last_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()>;
}
