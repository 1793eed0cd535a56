//! Fixtures for tests that need a migrated in-memory database.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;

use super::entities::{
    attachment_download_log, order_product_online, product, product_category, region,
    request_log, request_type, search_product, user, user_activity, wishlist,
};
use super::migrator::Migrator;
use crate::infrastructure::crypto::hash_password_with_cost;

/// Fresh schema on a single-connection in-memory SQLite database.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
        .and_utc()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub async fn insert_user(
    db: &DatabaseConnection,
    username: &str,
    role: user::UserRole,
    joined: DateTime<Utc>,
) -> String {
    insert_user_with_password(db, username, role, joined, "unused-password").await
}

pub async fn insert_user_with_password(
    db: &DatabaseConnection,
    username: &str,
    role: user::UserRole,
    joined: DateTime<Utc>,
    password: &str,
) -> String {
    let id = uuid::Uuid::new_v4().to_string();
    user::ActiveModel {
        id: Set(id.clone()),
        username: Set(username.to_string()),
        email: Set(format!("{}@example.com", username)),
        password_hash: Set(hash_password_with_cost(password, 4).unwrap()),
        role: Set(role),
        is_active: Set(true),
        date_joined: Set(joined),
        updated_at: Set(joined),
        last_login_at: Set(None),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn deactivate_user(db: &DatabaseConnection, id: &str) {
    let model = user::Entity::find_by_id(id.to_string())
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active: user::ActiveModel = model.into();
    active.is_active = Set(false);
    active.update(db).await.unwrap();
}

pub async fn insert_session(
    db: &DatabaseConnection,
    user_id: &str,
    login_date: NaiveDate,
    start: NaiveTime,
    end: Option<NaiveTime>,
) {
    user_activity::ActiveModel {
        user_id: Set(user_id.to_string()),
        login_date: Set(login_date),
        start_time: Set(start),
        end_time: Set(end),
        created_at: Set(login_date.and_time(start).and_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn insert_category(db: &DatabaseConnection, name: &str) -> i32 {
    let now = Utc::now();
    product_category::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_product(db: &DatabaseConnection, category_id: i32, name: &str) -> i32 {
    let now = Utc::now();
    product::ActiveModel {
        category_id: Set(category_id),
        name: Set(name.to_string()),
        description: Set(Some(format!("{} description", name))),
        image: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn insert_search(db: &DatabaseConnection, product_id: i32, when: DateTime<Utc>) {
    search_product::ActiveModel {
        user_id: Set(None),
        product_id: Set(product_id),
        date: Set(when),
        created_at: Set(when),
        updated_at: Set(when),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn insert_order(
    db: &DatabaseConnection,
    user_id: &str,
    product_id: i32,
    when: DateTime<Utc>,
) {
    let region_id = match region::Entity::find()
        .filter(region::Column::CountryCode.eq("DE"))
        .one(db)
        .await
        .unwrap()
    {
        Some(r) => r.id,
        None => {
            region::ActiveModel {
                country_code: Set("DE".into()),
                country_name: Set("Germany".into()),
                created_at: Set(when),
                updated_at: Set(when),
                ..Default::default()
            }
            .insert(db)
            .await
            .unwrap()
            .id
        }
    };

    order_product_online::ActiveModel {
        region_id: Set(region_id),
        user_id: Set(user_id.to_string()),
        product_id: Set(product_id),
        status: Set(order_product_online::OrderStatus::Pending),
        order_date: Set(when),
        created_at: Set(when),
        updated_at: Set(when),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn insert_wishlist(db: &DatabaseConnection, user_id: &str, product_id: i32, active: bool) {
    let now = Utc::now();
    wishlist::ActiveModel {
        user_id: Set(user_id.to_string()),
        product_id: Set(product_id),
        is_active: Set(active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn insert_download(db: &DatabaseConnection, product_id: i32) {
    attachment_download_log::ActiveModel {
        user_id: Set(None),
        product_id: Set(product_id),
        file_name: Set("brochure.pdf".into()),
        date: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

/// Log a request of the seeded type `type_name`.
pub async fn insert_request(
    db: &DatabaseConnection,
    product_id: i32,
    type_name: &str,
    name: &str,
    when: DateTime<Utc>,
) {
    let request_type = request_type::Entity::find()
        .filter(request_type::Column::Name.eq(type_name))
        .one(db)
        .await
        .unwrap()
        .unwrap();

    request_log::ActiveModel {
        user_id: Set(None),
        product_id: Set(product_id),
        request_type_id: Set(request_type.id),
        name: Set(name.to_string()),
        message: Set(None),
        date: Set(when),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}
