use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Vendor => UserRole::Vendor,
    }
}

pub(super) fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Vendor => user::UserRole::Vendor,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
        date_joined: model.date_joined,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

fn role_query(role: UserRole, joined_since: Option<DateTime<Utc>>) -> sea_orm::Select<user::Entity> {
    let mut query = user::Entity::find().filter(user::Column::Role.eq(domain_role_to_entity(role)));
    if let Some(since) = joined_since {
        query = query.filter(user::Column::DateJoined.gte(since));
    }
    query
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let new_user = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(dto.username),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            role: Set(domain_role_to_entity(dto.role)),
            is_active: Set(true),
            date_joined: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::Conflict("Username or email already exists".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(user_model_to_domain(model))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(user::Entity::find().count(&self.db).await?)
    }

    async fn count_by_role(
        &self,
        role: UserRole,
        joined_since: Option<DateTime<Utc>>,
    ) -> DomainResult<u64> {
        Ok(role_query(role, joined_since).count(&self.db).await?)
    }

    async fn list_by_role(
        &self,
        role: UserRole,
        joined_since: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<User>> {
        let models = role_query(role, joined_since)
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn list_by_ids(&self, ids: &[String]) -> DomainResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = user::Entity::find()
            .filter(user::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn list_by_role_excluding(
        &self,
        role: UserRole,
        excluded: &[String],
    ) -> DomainResult<Vec<User>> {
        let mut query = role_query(role, None);
        if !excluded.is_empty() {
            query = query.filter(user::Column::Id.is_not_in(excluded.to_vec()));
        }

        let models = query
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn update_last_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: user::ActiveModel = existing.into();
        active.last_login_at = Set(Some(at));
        active.updated_at = Set(at);
        active.update(&self.db).await?;

        Ok(())
    }
}
