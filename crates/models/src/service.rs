use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Catalog entry a customer can book.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub base_price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

pub const NAME_MAX_LEN: usize = 255;

pub fn validate_name(name: &str) -> Result<String, ModelError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("name must be 1..={NAME_MAX_LEN} characters")));
    }
    Ok(name.to_string())
}

pub fn validate_base_price(price: Decimal) -> Result<Decimal, ModelError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ModelError::Validation("base_price must be >= 0".into()));
    }
    Ok(price)
}

pub fn validate_duration(minutes: i32) -> Result<i32, ModelError> {
    if minutes < 1 {
        return Err(ModelError::Validation("duration_minutes must be >= 1".into()));
    }
    Ok(minutes)
}

/// Active services only; inactive ones cannot back new orders.
pub async fn find_active<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    let found = Entity::find_by_id(id)
        .filter(Column::IsActive.eq(true))
        .one(db)
        .await?;
    Ok(found)
}

/// Soft delete: flips `is_active` and keeps the row.
pub async fn deactivate<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.is_active = Set(false);
    Ok(Some(am.update(db).await?))
}
