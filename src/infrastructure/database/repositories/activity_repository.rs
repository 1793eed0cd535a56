use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Timelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::user_repository::domain_role_to_entity;
use crate::domain::{
    ActivityRepository, ActivityWindow, DomainResult, SessionRecord, UserActivity, UserRole,
};
use crate::infrastructure::database::entities::{user, user_activity};

pub struct SeaOrmActivityRepository {
    db: DatabaseConnection,
}

impl SeaOrmActivityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn activity_model_to_domain(model: user_activity::Model) -> UserActivity {
    UserActivity {
        id: model.id,
        user_id: model.user_id,
        login_date: model.login_date,
        start_time: model.start_time,
        end_time: model.end_time,
        created_at: model.created_at,
    }
}

fn window_condition(window: ActivityWindow) -> Condition {
    let date = user_activity::Column::LoginDate;
    match window {
        ActivityWindow::Ever => Condition::all(),
        ActivityWindow::On(d) => Condition::all().add(date.eq(d)),
        ActivityWindow::Since(d) => Condition::all().add(date.gte(d)),
        ActivityWindow::Between(from, to) => Condition::all().add(date.between(from, to)),
    }
}

/// Wall-clock time at whole-second precision.
fn clock_time(at: DateTime<Utc>) -> NaiveTime {
    let t = at.time();
    t.with_nanosecond(0).unwrap_or(t)
}

/// Last second of the login day, used to close sessions left open past midnight.
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

#[async_trait]
impl ActivityRepository for SeaOrmActivityRepository {
    async fn open_session(&self, user_id: &str, at: DateTime<Utc>) -> DomainResult<UserActivity> {
        let model = user_activity::ActiveModel {
            user_id: Set(user_id.to_string()),
            login_date: Set(at.date_naive()),
            start_time: Set(clock_time(at)),
            end_time: Set(None),
            created_at: Set(at),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(activity_model_to_domain(model))
    }

    async fn close_latest_session(
        &self,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<UserActivity>> {
        let open = user_activity::Entity::find()
            .filter(user_activity::Column::UserId.eq(user_id))
            .filter(user_activity::Column::EndTime.is_null())
            .order_by_desc(user_activity::Column::LoginDate)
            .order_by_desc(user_activity::Column::StartTime)
            .order_by_desc(user_activity::Column::Id)
            .one(&self.db)
            .await?;

        let Some(open) = open else {
            return Ok(None);
        };

        let end = if open.login_date == at.date_naive() {
            clock_time(at)
        } else {
            end_of_day()
        };

        let mut active: user_activity::ActiveModel = open.into();
        active.end_time = Set(Some(end));
        let closed = active.update(&self.db).await?;

        Ok(Some(activity_model_to_domain(closed)))
    }

    async fn distinct_active_users(
        &self,
        role: UserRole,
        window: ActivityWindow,
    ) -> DomainResult<Vec<String>> {
        let ids: Vec<String> = user_activity::Entity::find()
            .select_only()
            .column(user_activity::Column::UserId)
            .distinct()
            .join(JoinType::InnerJoin, user_activity::Relation::User.def())
            .filter(user::Column::Role.eq(domain_role_to_entity(role)))
            .filter(window_condition(window))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(ids)
    }

    async fn closed_sessions(&self, role: Option<UserRole>) -> DomainResult<Vec<SessionRecord>> {
        let mut query = user_activity::Entity::find()
            .find_also_related(user::Entity)
            .filter(user_activity::Column::EndTime.is_not_null());
        if let Some(role) = role {
            query = query.filter(user::Column::Role.eq(domain_role_to_entity(role)));
        }

        let rows = query
            .order_by_asc(user_activity::Column::LoginDate)
            .order_by_asc(user_activity::Column::StartTime)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(activity, owner)| {
                let owner = owner?;
                Some(SessionRecord {
                    user_id: activity.user_id,
                    username: owner.username,
                    login_date: activity.login_date,
                    start_time: activity.start_time,
                    end_time: activity.end_time?,
                })
            })
            .collect())
    }

    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<UserActivity>> {
        let models = user_activity::Entity::find()
            .filter(user_activity::Column::UserId.eq(user_id))
            .order_by_desc(user_activity::Column::LoginDate)
            .order_by_desc(user_activity::Column::StartTime)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(activity_model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::*;

    #[tokio::test]
    async fn open_then_close_same_day() {
        let db = memory_db().await;
        let ann = insert_user(&db, "ann", user::UserRole::Vendor, at(2026, 1, 1, 0, 0)).await;
        let repo = SeaOrmActivityRepository::new(db);

        let opened = repo.open_session(&ann, at(2026, 10, 17, 9, 15)).await.unwrap();
        assert!(opened.is_open());
        assert_eq!(opened.login_date, date(2026, 10, 17));
        assert_eq!(opened.start_time, time(9, 15));

        let closed = repo
            .close_latest_session(&ann, at(2026, 10, 17, 10, 0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.id, opened.id);
        assert_eq!(closed.end_time, Some(time(10, 0)));

        let again = repo.close_latest_session(&ann, at(2026, 10, 17, 11, 0)).await.unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn session_left_open_overnight_ends_at_midnight() {
        let db = memory_db().await;
        let ann = insert_user(&db, "ann", user::UserRole::Vendor, at(2026, 1, 1, 0, 0)).await;
        let repo = SeaOrmActivityRepository::new(db);

        repo.open_session(&ann, at(2026, 10, 16, 22, 0)).await.unwrap();
        let closed = repo
            .close_latest_session(&ann, at(2026, 10, 17, 1, 0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.end_time, NaiveTime::from_hms_opt(23, 59, 59));
    }

    #[tokio::test]
    async fn distinct_users_respect_role_and_window() {
        let db = memory_db().await;
        let admin = insert_user(&db, "root", user::UserRole::Admin, at(2026, 1, 1, 0, 0)).await;
        let ann = insert_user(&db, "ann", user::UserRole::Vendor, at(2026, 1, 1, 0, 0)).await;
        let bob = insert_user(&db, "bob", user::UserRole::Vendor, at(2026, 1, 1, 0, 0)).await;

        insert_session(&db, &admin, date(2026, 10, 17), time(8, 0), None).await;
        insert_session(&db, &ann, date(2026, 10, 17), time(9, 0), Some(time(9, 30))).await;
        insert_session(&db, &ann, date(2026, 10, 17), time(11, 0), None).await;
        insert_session(&db, &bob, date(2026, 10, 10), time(9, 0), Some(time(9, 5))).await;
        let repo = SeaOrmActivityRepository::new(db);

        let today = repo
            .distinct_active_users(UserRole::Vendor, ActivityWindow::On(date(2026, 10, 17)))
            .await
            .unwrap();
        assert_eq!(today, vec![ann.clone()]);

        let mut ever = repo
            .distinct_active_users(UserRole::Vendor, ActivityWindow::Ever)
            .await
            .unwrap();
        ever.sort();
        let mut expected = vec![ann.clone(), bob.clone()];
        expected.sort();
        assert_eq!(ever, expected);

        let between = repo
            .distinct_active_users(
                UserRole::Vendor,
                ActivityWindow::Between(date(2026, 10, 5), date(2026, 10, 11)),
            )
            .await
            .unwrap();
        assert_eq!(between, vec![bob]);

        let admins = repo
            .distinct_active_users(UserRole::Admin, ActivityWindow::Since(date(2026, 10, 1)))
            .await
            .unwrap();
        assert_eq!(admins, vec![admin]);
    }

    #[tokio::test]
    async fn closed_sessions_skip_open_rows_and_filter_role() {
        let db = memory_db().await;
        let admin = insert_user(&db, "root", user::UserRole::Admin, at(2026, 1, 1, 0, 0)).await;
        let ann = insert_user(&db, "ann", user::UserRole::Vendor, at(2026, 1, 1, 0, 0)).await;

        insert_session(&db, &admin, date(2026, 10, 16), time(8, 0), Some(time(8, 30))).await;
        insert_session(&db, &ann, date(2026, 10, 16), time(9, 0), Some(time(9, 45))).await;
        insert_session(&db, &ann, date(2026, 10, 17), time(9, 0), None).await;
        let repo = SeaOrmActivityRepository::new(db);

        let all = repo.closed_sessions(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let vendors = repo.closed_sessions(Some(UserRole::Vendor)).await.unwrap();
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].username, "ann");
        assert_eq!(vendors[0].duration(), chrono::Duration::minutes(45));

        let history = repo.list_for_user(&ann).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].is_open());
    }
}
