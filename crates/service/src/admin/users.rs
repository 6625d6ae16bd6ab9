use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument};

use models::errors::ModelError;
use models::{order, user};
use crate::errors::ServiceError;
use crate::pagination::{DateRange, Page, Pagination, SortOrder};
use crate::patch::Patch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSortField {
    #[default]
    Id,
    PhoneNumber,
    TelegramId,
    LanguageCode,
    CreatedAt,
    UpdatedAt,
}

impl UserSortField {
    fn column(self) -> user::Column {
        match self {
            UserSortField::Id => user::Column::Id,
            UserSortField::PhoneNumber => user::Column::PhoneNumber,
            UserSortField::TelegramId => user::Column::TelegramId,
            UserSortField::LanguageCode => user::Column::LanguageCode,
            UserSortField::CreatedAt => user::Column::CreatedAt,
            UserSortField::UpdatedAt => user::Column::UpdatedAt,
        }
    }
}

/// Query string of `GET /admin/users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<UserSortField>,
    pub order: Option<SortOrder>,
    pub date_from: Option<DateTimeWithTimeZone>,
    pub date_to: Option<DateTimeWithTimeZone>,
    /// substring of the phone number
    pub q: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub phone_number: String,
    #[serde(default)]
    pub telegram_id: Option<i64>,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub phone_number: Patch<String>,
    #[serde(default)]
    pub telegram_id: Patch<i64>,
    #[serde(default)]
    pub language_code: Patch<String>,
}

#[instrument(skip(db))]
pub async fn list_users(db: &DatabaseConnection, query: UserListQuery) -> Result<Page<user::Model>, ServiceError> {
    let page = Pagination::new(query.skip, query.limit);
    let dates = DateRange { from: query.date_from, to: query.date_to };
    let needle = query.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty());

    let filtered = dates
        .apply(user::Entity::find(), user::Column::CreatedAt)
        .apply_if(needle, |q, needle| q.filter(user::Column::PhoneNumber.contains(needle.as_str())));
    let total = filtered.clone().count(db).await?;

    let items = filtered
        .order_by(query.sort_by.unwrap_or_default().column(), query.order.unwrap_or(SortOrder::Asc).into())
        .order_by_asc(user::Column::Id)
        .offset(page.skip)
        .limit(page.limit)
        .all(db)
        .await?;
    Ok(Page { items, total })
}

fn duplicate_phone(phone: &str) -> ServiceError {
    ServiceError::Conflict(format!("User with phone number {} already exists", phone.trim()))
}

fn duplicate_telegram_id(telegram_id: i64) -> ServiceError {
    ServiceError::Conflict(format!("User with telegram_id {telegram_id} already exists"))
}

#[instrument(skip(db, input), fields(phone = %input.phone_number))]
pub async fn create_user(db: &DatabaseConnection, input: NewUser) -> Result<user::Model, ServiceError> {
    let phone = user::validate_phone(&input.phone_number)?;
    if user::find_by_phone(db, &phone).await?.is_some() {
        return Err(duplicate_phone(&phone));
    }
    if let Some(tg) = input.telegram_id {
        if user::find_by_telegram_id(db, tg).await?.is_some() {
            return Err(duplicate_telegram_id(tg));
        }
    }

    // A concurrent insert can still trip either unique index
    let created = match user::create(db, &phone, input.telegram_id, input.language_code.as_deref()).await {
        Err(ModelError::Conflict(reason)) => {
            return Err(match input.telegram_id {
                Some(tg) if reason.contains("telegram_id") => duplicate_telegram_id(tg),
                _ => duplicate_phone(&phone),
            })
        }
        other => other?,
    };
    info!(user_id = created.id, "admin_user_created");
    Ok(created)
}

pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", id))
}

#[instrument(skip(db, update))]
pub async fn update_user(db: &DatabaseConnection, id: i32, update: UserUpdate) -> Result<user::Model, ServiceError> {
    let mut am: user::ActiveModel = get_user(db, id).await?.into();
    if let Some(phone) = update.phone_number.into_required("phone_number")? {
        am.phone_number = Set(user::validate_phone(&phone)?);
    }
    if let Some(tg) = update.telegram_id.into_change() {
        am.telegram_id = Set(tg);
    }
    let language = update.language_code.try_map(|c| user::validate_language_code(&c))?;
    if let Some(lang) = language.into_change() {
        am.language_code = Set(lang);
    }
    let updated = am.update(db).await?;
    info!(user_id = id, "admin_user_updated");
    Ok(updated)
}

/// Delete a user and, through the foreign key, all of their orders.
/// Returns how many orders went with them.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let txn = db.begin().await?;
    if user::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found("User", id));
    }
    let orders_deleted = order::count_for_user(&txn, id).await?;
    user::hard_delete(&txn, id).await?;
    txn.commit().await?;
    info!(user_id = id, orders_deleted, "admin_user_deleted");
    Ok(orders_deleted)
}

/// Orders of one user, newest first.
pub async fn list_user_orders(db: &DatabaseConnection, id: i32) -> Result<Vec<order::Model>, ServiceError> {
    get_user(db, id).await?;
    let orders = order::Entity::find()
        .filter(order::Column::UserId.eq(id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?;
    Ok(orders)
}
