use std::collections::BTreeMap;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QuerySelect};
use serde::Serialize;

use models::order::{self, OrderStatus};
use models::{service, user};
use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_users: u64,
    pub total_orders: u64,
    /// active services only
    pub total_services: u64,
    pub orders_by_status: BTreeMap<String, u64>,
}

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: String,
    count: i64,
}

/// Aggregate counts; every known status is present, zero when unused.
pub async fn collect(db: &DatabaseConnection) -> Result<Stats, ServiceError> {
    let total_users = user::Entity::find().count(db).await?;
    let total_orders = order::Entity::find().count(db).await?;
    let total_services = service::Entity::find()
        .filter(service::Column::IsActive.eq(true))
        .count(db)
        .await?;

    let grouped = order::Entity::find()
        .select_only()
        .column(order::Column::Status)
        .column_as(Expr::col(order::Column::Id).count(), "count")
        .group_by(order::Column::Status)
        .into_model::<StatusCount>()
        .all(db)
        .await?;

    let mut orders_by_status: BTreeMap<String, u64> =
        OrderStatus::ALL.iter().map(|s| (s.as_str().to_string(), 0)).collect();
    for row in grouped {
        orders_by_status.insert(row.status, row.count.max(0) as u64);
    }

    Ok(Stats { total_users, total_orders, total_services, orders_by_status })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique_phone};
    use sea_orm::{ActiveModelTrait, Set};

    #[tokio::test]
    async fn stats_cover_every_status() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let stats = collect(&db).await?;
        for st in OrderStatus::ALL {
            assert!(stats.orders_by_status.contains_key(st.as_str()));
        }
        assert_eq!(stats.orders_by_status.len(), OrderStatus::ALL.len());
        Ok(())
    }

    #[tokio::test]
    async fn status_counts_follow_new_orders() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let before = collect(&db).await?;

        let u = user::create(&db, &unique_phone(), None, None).await?;
        for status in [OrderStatus::Cancelled, OrderStatus::Cancelled, OrderStatus::InProgress] {
            order::ActiveModel { user_id: Set(u.id), status: Set(status), ..Default::default() }
                .insert(&db)
                .await?;
        }
        let after = collect(&db).await?;
        user::hard_delete(&db, u.id).await?;

        let delta = |st: OrderStatus| after.orders_by_status[st.as_str()] - before.orders_by_status[st.as_str()];
        assert_eq!(delta(OrderStatus::Cancelled), 2);
        assert_eq!(delta(OrderStatus::InProgress), 1);
        Ok(())
    }
}
