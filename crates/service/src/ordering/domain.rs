use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

/// Customer order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderInput {
    pub user_id: i32,
    pub service_id: i32,
    #[serde(default)]
    pub address_text: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Row to persist once payment has gone through. Status is always pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: i32,
    pub service_id: i32,
    pub total_amount: Decimal,
    pub address_text: Option<String>,
    pub scheduled_at: Option<DateTimeWithTimeZone>,
    pub notes: Option<String>,
}
