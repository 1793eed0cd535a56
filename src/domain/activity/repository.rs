use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ActivityWindow, SessionRecord, UserActivity};
use crate::domain::{DomainResult, UserRole};

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Open a session row for a login at `at`.
    async fn open_session(&self, user_id: &str, at: DateTime<Utc>) -> DomainResult<UserActivity>;

    /// Close the most recent open session of the user, if any.
    async fn close_latest_session(
        &self,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<UserActivity>>;

    /// Distinct ids of users with `role` who have activity inside `window`.
    async fn distinct_active_users(
        &self,
        role: UserRole,
        window: ActivityWindow,
    ) -> DomainResult<Vec<String>>;

    /// Closed sessions, optionally restricted to users of one role.
    async fn closed_sessions(&self, role: Option<UserRole>) -> DomainResult<Vec<SessionRecord>>;

    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<UserActivity>>;
}
