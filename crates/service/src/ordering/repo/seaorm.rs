use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, ColumnTrait, Set};

use models::{order, service, user};
use crate::errors::ServiceError;
use crate::ordering::domain::NewOrder;
use crate::ordering::repository::OrderRepository;

pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_active_service(&self, id: i32) -> Result<Option<service::Model>, ServiceError> {
        Ok(service::find_active(&self.db, id).await?)
    }

    async fn user_exists(&self, id: i32) -> Result<bool, ServiceError> {
        let n = user::Entity::find()
            .filter(user::Column::Id.eq(id))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn insert(&self, new: NewOrder) -> Result<order::Model, ServiceError> {
        let am = order::ActiveModel {
            user_id: Set(new.user_id),
            service_id: Set(Some(new.service_id)),
            status: Set(order::OrderStatus::Pending),
            total_amount: Set(Some(new.total_amount)),
            address_text: Set(new.address_text),
            scheduled_at: Set(new.scheduled_at),
            notes: Set(new.notes),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }
}
