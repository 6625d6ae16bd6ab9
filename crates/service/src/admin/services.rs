use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, Set,
};
use serde::Deserialize;
use tracing::{info, instrument};

use models::service;
use crate::errors::ServiceError;
use crate::pagination::{DateRange, Page, Pagination, SortOrder};
use crate::patch::Patch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSortField {
    #[default]
    Id,
    Name,
    BasePrice,
    IsActive,
    CreatedAt,
}

impl ServiceSortField {
    fn column(self) -> service::Column {
        match self {
            ServiceSortField::Id => service::Column::Id,
            ServiceSortField::Name => service::Column::Name,
            ServiceSortField::BasePrice => service::Column::BasePrice,
            ServiceSortField::IsActive => service::Column::IsActive,
            ServiceSortField::CreatedAt => service::Column::CreatedAt,
        }
    }
}

/// Query string of `GET /admin/services`. Inactive services are included by default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub include_inactive: Option<bool>,
    pub sort_by: Option<ServiceSortField>,
    pub order: Option<SortOrder>,
    pub date_from: Option<DateTimeWithTimeZone>,
    pub date_to: Option<DateTimeWithTimeZone>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewService {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceUpdate {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub base_price: Patch<Decimal>,
    #[serde(default)]
    pub duration_minutes: Patch<i32>,
    #[serde(default)]
    pub is_active: Patch<bool>,
}

#[instrument(skip(db))]
pub async fn list_services(db: &DatabaseConnection, query: ServiceListQuery) -> Result<Page<service::Model>, ServiceError> {
    let page = Pagination::new(query.skip, query.limit);
    let dates = DateRange { from: query.date_from, to: query.date_to };
    let only_active = !query.include_inactive.unwrap_or(true);

    let filtered = dates
        .apply(service::Entity::find(), service::Column::CreatedAt)
        .apply_if(only_active.then_some(true), |q, active| q.filter(service::Column::IsActive.eq(active)));
    let total = filtered.clone().count(db).await?;

    let items = filtered
        .order_by(query.sort_by.unwrap_or_default().column(), query.order.unwrap_or(SortOrder::Asc).into())
        .order_by_asc(service::Column::Id)
        .offset(page.skip)
        .limit(page.limit)
        .all(db)
        .await?;
    Ok(Page { items, total })
}

#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_service(db: &DatabaseConnection, input: NewService) -> Result<service::Model, ServiceError> {
    let created = service::ActiveModel {
        name: Set(service::validate_name(&input.name)?),
        description: Set(input.description),
        base_price: Set(input.base_price.map(service::validate_base_price).transpose()?),
        duration_minutes: Set(input.duration_minutes.map(service::validate_duration).transpose()?),
        is_active: Set(input.is_active.unwrap_or(true)),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!(service_id = created.id, "admin_service_created");
    Ok(created)
}

pub async fn get_service(db: &DatabaseConnection, id: i32) -> Result<service::Model, ServiceError> {
    crate::catalog::get_service(db, id).await
}

#[instrument(skip(db, update))]
pub async fn update_service(db: &DatabaseConnection, id: i32, update: ServiceUpdate) -> Result<service::Model, ServiceError> {
    let mut am: service::ActiveModel = get_service(db, id).await?.into();
    if let Some(name) = update.name.into_required("name")? {
        am.name = Set(service::validate_name(&name)?);
    }
    if let Some(desc) = update.description.into_change() {
        am.description = Set(desc);
    }
    if let Some(price) = update.base_price.try_map(service::validate_base_price)?.into_change() {
        am.base_price = Set(price);
    }
    if let Some(minutes) = update.duration_minutes.try_map(service::validate_duration)?.into_change() {
        am.duration_minutes = Set(minutes);
    }
    if let Some(active) = update.is_active.into_required("is_active")? {
        am.is_active = Set(active);
    }
    let updated = am.update(db).await?;
    info!(service_id = id, "admin_service_updated");
    Ok(updated)
}

/// Soft delete. The row and the orders pointing at it stay.
#[instrument(skip(db))]
pub async fn deactivate_service(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    service::deactivate(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service", id))?;
    info!(service_id = id, "admin_service_deactivated");
    Ok(())
}
