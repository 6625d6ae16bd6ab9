//! Read-only catalog for bot and client access.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QueryTrait};

use models::service;
use crate::errors::ServiceError;

/// Services ordered by name; inactive ones only when asked for.
pub async fn list_services(db: &DatabaseConnection, include_inactive: bool) -> Result<Vec<service::Model>, ServiceError> {
    let services = service::Entity::find()
        .apply_if((!include_inactive).then_some(true), |q, active| q.filter(service::Column::IsActive.eq(active)))
        .order_by_asc(service::Column::Name)
        .order_by_asc(service::Column::Id)
        .all(db)
        .await?;
    Ok(services)
}

/// Any service by id, active or not.
pub async fn get_service(db: &DatabaseConnection, id: i32) -> Result<service::Model, ServiceError> {
    service::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service", id))
}
