use async_trait::async_trait;
use models::{order, service};

use super::domain::NewOrder;
use crate::errors::ServiceError;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// `None` when the service is missing or inactive.
    async fn find_active_service(&self, id: i32) -> Result<Option<service::Model>, ServiceError>;
    async fn user_exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn insert(&self, order: NewOrder) -> Result<order::Model, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockOrderRepository {
        services: Mutex<BTreeMap<i32, service::Model>>,
        users: Mutex<HashSet<i32>>,
        orders: Mutex<Vec<order::Model>>,
    }

    impl MockOrderRepository {
        pub fn add_user(&self, id: i32) {
            self.users.lock().unwrap().insert(id);
        }

        pub fn add_service(&self, id: i32, base_price: Option<Decimal>, is_active: bool) {
            let now = Utc::now().into();
            let s = service::Model {
                id,
                name: format!("Service {id}"),
                description: None,
                base_price,
                duration_minutes: Some(60),
                is_active,
                created_at: now,
                updated_at: now,
            };
            self.services.lock().unwrap().insert(id, s);
        }

        pub fn set_price(&self, id: i32, base_price: Option<Decimal>) {
            if let Some(s) = self.services.lock().unwrap().get_mut(&id) {
                s.base_price = base_price;
            }
        }

        pub fn orders(&self) -> Vec<order::Model> {
            self.orders.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderRepository for MockOrderRepository {
        async fn find_active_service(&self, id: i32) -> Result<Option<service::Model>, ServiceError> {
            let services = self.services.lock().unwrap();
            Ok(services.get(&id).filter(|s| s.is_active).cloned())
        }

        async fn user_exists(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.users.lock().unwrap().contains(&id))
        }

        async fn insert(&self, new: NewOrder) -> Result<order::Model, ServiceError> {
            let mut orders = self.orders.lock().unwrap();
            let now = Utc::now().into();
            let o = order::Model {
                id: orders.len() as i32 + 1,
                user_id: new.user_id,
                service_id: Some(new.service_id),
                status: order::OrderStatus::Pending,
                total_amount: Some(new.total_amount),
                address_text: new.address_text,
                scheduled_at: new.scheduled_at,
                notes: new.notes,
                created_at: now,
                updated_at: now,
            };
            orders.push(o.clone());
            Ok(o)
        }
    }
}
