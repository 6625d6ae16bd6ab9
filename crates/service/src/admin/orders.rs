use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set,
};
use serde::Deserialize;
use tracing::{info, instrument};

use models::order::{self, OrderStatus};
use models::{service, user};
use crate::errors::ServiceError;
use crate::pagination::{DateRange, Page, Pagination, SortOrder};
use crate::patch::Patch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSortField {
    Id,
    UserId,
    Status,
    TotalAmount,
    AddressText,
    ScheduledAt,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl OrderSortField {
    fn column(self) -> order::Column {
        match self {
            OrderSortField::Id => order::Column::Id,
            OrderSortField::UserId => order::Column::UserId,
            OrderSortField::Status => order::Column::Status,
            OrderSortField::TotalAmount => order::Column::TotalAmount,
            OrderSortField::AddressText => order::Column::AddressText,
            OrderSortField::ScheduledAt => order::Column::ScheduledAt,
            OrderSortField::CreatedAt => order::Column::CreatedAt,
            OrderSortField::UpdatedAt => order::Column::UpdatedAt,
        }
    }
}

/// Query string of `GET /admin/orders`. Newest first unless told otherwise.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<OrderStatus>,
    pub user_id: Option<i32>,
    pub sort_by: Option<OrderSortField>,
    pub order: Option<SortOrder>,
    pub date_from: Option<DateTimeWithTimeZone>,
    pub date_to: Option<DateTimeWithTimeZone>,
}

/// Direct order creation; skips payment and notification.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAdminOrder {
    pub user_id: i32,
    #[serde(default)]
    pub service_id: Option<i32>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub address_text: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub status: Patch<OrderStatus>,
    #[serde(default)]
    pub service_id: Patch<i32>,
    #[serde(default)]
    pub total_amount: Patch<Decimal>,
    #[serde(default)]
    pub address_text: Patch<String>,
    #[serde(default)]
    pub scheduled_at: Patch<DateTimeWithTimeZone>,
    #[serde(default)]
    pub notes: Patch<String>,
}

fn validate_amount(amount: Decimal) -> Result<Decimal, ServiceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ServiceError::Validation("total_amount must be >= 0".into()));
    }
    Ok(amount)
}

async fn ensure_user(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    match user::Entity::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::not_found("User", id)),
    }
}

async fn ensure_service(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    match service::Entity::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::not_found("Service", id)),
    }
}

#[instrument(skip(db))]
pub async fn list_orders(db: &DatabaseConnection, query: OrderListQuery) -> Result<Page<order::Model>, ServiceError> {
    let page = Pagination::new(query.skip, query.limit);
    let dates = DateRange { from: query.date_from, to: query.date_to };

    let filtered = dates
        .apply(order::Entity::find(), order::Column::CreatedAt)
        .apply_if(query.status, |q, st| q.filter(order::Column::Status.eq(st)))
        .apply_if(query.user_id, |q, uid| q.filter(order::Column::UserId.eq(uid)));
    let total = filtered.clone().count(db).await?;

    let items = filtered
        .order_by(query.sort_by.unwrap_or_default().column(), query.order.unwrap_or(SortOrder::Desc).into())
        .order_by_desc(order::Column::Id)
        .offset(page.skip)
        .limit(page.limit)
        .all(db)
        .await?;
    Ok(Page { items, total })
}

#[instrument(skip(db, input), fields(user_id = input.user_id))]
pub async fn create_order(db: &DatabaseConnection, input: NewAdminOrder) -> Result<order::Model, ServiceError> {
    ensure_user(db, input.user_id).await?;
    if let Some(sid) = input.service_id {
        ensure_service(db, sid).await?;
    }
    let total_amount = input.total_amount.map(validate_amount).transpose()?;
    let created = order::ActiveModel {
        user_id: Set(input.user_id),
        service_id: Set(input.service_id),
        status: Set(input.status.unwrap_or(OrderStatus::Pending)),
        total_amount: Set(total_amount),
        address_text: Set(input.address_text),
        scheduled_at: Set(input.scheduled_at),
        notes: Set(input.notes),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!(order_id = created.id, "admin_order_created");
    Ok(created)
}

pub async fn get_order(db: &DatabaseConnection, id: i32) -> Result<order::Model, ServiceError> {
    order::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Order", id))
}

/// Order together with the user who placed it.
pub async fn get_order_with_user(db: &DatabaseConnection, id: i32) -> Result<(order::Model, user::Model), ServiceError> {
    match order::Entity::find_by_id(id).find_also_related(user::Entity).one(db).await? {
        Some((o, Some(u))) => Ok((o, u)),
        Some((o, None)) => Err(ServiceError::Db(format!("order {} references missing user {}", o.id, o.user_id))),
        None => Err(ServiceError::not_found("Order", id)),
    }
}

/// Status may take any value at any time; only `null` is refused.
#[instrument(skip(db, update))]
pub async fn update_order(db: &DatabaseConnection, id: i32, update: OrderUpdate) -> Result<order::Model, ServiceError> {
    let mut am: order::ActiveModel = get_order(db, id).await?.into();
    if let Some(status) = update.status.into_required("status")? {
        am.status = Set(status);
    }
    if let Some(sid) = update.service_id.into_change() {
        if let Some(sid) = sid {
            ensure_service(db, sid).await?;
        }
        am.service_id = Set(sid);
    }
    if let Some(amount) = update.total_amount.try_map(validate_amount)?.into_change() {
        am.total_amount = Set(amount);
    }
    if let Some(addr) = update.address_text.into_change() {
        am.address_text = Set(addr);
    }
    if let Some(at) = update.scheduled_at.into_change() {
        am.scheduled_at = Set(at);
    }
    if let Some(notes) = update.notes.into_change() {
        am.notes = Set(notes);
    }
    let updated = am.update(db).await?;
    info!(order_id = id, status = %updated.status, "admin_order_updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    get_order(db, id).await?.delete(db).await?;
    info!(order_id = id, "admin_order_deleted");
    Ok(())
}
