use std::collections::BTreeMap;

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct StatusMessageDoc { pub status: String, pub message: String }

#[derive(ToSchema)]
pub struct RegisterRequestDoc {
    #[schema(example = "+998901234567")]
    pub phone_number: String,
    pub telegram_id: Option<i64>,
    #[schema(example = "uz")]
    pub language_code: Option<String>,
}

#[derive(ToSchema)]
pub struct RegistrationResponseDoc { pub status: String, pub message: String, pub user_id: i32 }

#[derive(ToSchema)]
pub struct LanguageUpdateDoc {
    #[schema(example = "ru")]
    pub language_code: String,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: i32,
    pub phone_number: String,
    pub telegram_id: Option<i64>,
    pub language_code: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct CreateOrderDoc {
    pub user_id: i32,
    pub service_id: i32,
    pub address_text: Option<String>,
    /// RFC 3339
    pub scheduled_at: Option<String>,
    pub notes: Option<String>,
}

#[derive(ToSchema)]
pub struct OrderCreatedDoc { pub status: String, pub order_id: i32, pub message: String }

#[derive(ToSchema)]
pub struct ServiceDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// decimal serialized as string
    #[schema(example = "150000.00")]
    pub base_price: Option<String>,
    pub duration_minutes: Option<i32>,
    pub is_active: bool,
}

#[derive(ToSchema)]
pub struct ServiceListDoc { pub services: Vec<ServiceDoc>, pub total: u64 }

#[derive(ToSchema)]
pub struct NewServiceDoc {
    pub name: String,
    pub description: Option<String>,
    pub base_price: Option<String>,
    pub duration_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

/// Omitted fields are left alone; `null` clears nullable ones.
#[derive(ToSchema)]
pub struct ServiceUpdateDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<String>,
    pub duration_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(ToSchema)]
pub struct AdminUserListDoc { pub users: Vec<UserDoc>, pub total: u64 }

#[derive(ToSchema)]
pub struct NewUserDoc {
    pub phone_number: String,
    pub telegram_id: Option<i64>,
    pub language_code: Option<String>,
}

/// Omitted fields are left alone; `null` clears nullable ones.
#[derive(ToSchema)]
pub struct UserUpdateDoc {
    pub phone_number: Option<String>,
    pub telegram_id: Option<i64>,
    pub language_code: Option<String>,
}

#[derive(ToSchema)]
pub struct UserDeletedDoc { pub status: String, pub message: String, pub orders_deleted: u64 }

#[derive(ToSchema)]
pub struct AdminOrderDoc {
    pub id: i32,
    pub user_id: i32,
    pub service_id: Option<i32>,
    #[schema(example = "pending")]
    pub status: String,
    pub total_amount: Option<String>,
    pub address_text: Option<String>,
    pub scheduled_at: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct AdminOrderWithUserDoc {
    pub id: i32,
    pub user_id: i32,
    pub service_id: Option<i32>,
    pub status: String,
    pub total_amount: Option<String>,
    pub address_text: Option<String>,
    pub scheduled_at: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub user: UserDoc,
}

#[derive(ToSchema)]
pub struct AdminOrderListDoc { pub orders: Vec<AdminOrderDoc>, pub total: u64 }

#[derive(ToSchema)]
pub struct NewAdminOrderDoc {
    pub user_id: i32,
    pub service_id: Option<i32>,
    pub status: Option<String>,
    pub total_amount: Option<String>,
    pub address_text: Option<String>,
    pub scheduled_at: Option<String>,
    pub notes: Option<String>,
}

/// Omitted fields are left alone; `null` clears nullable ones. `status` cannot be null.
#[derive(ToSchema)]
pub struct OrderUpdateDoc {
    pub status: Option<String>,
    pub service_id: Option<i32>,
    pub total_amount: Option<String>,
    pub address_text: Option<String>,
    pub scheduled_at: Option<String>,
    pub notes: Option<String>,
}

#[derive(ToSchema)]
pub struct StatsDoc {
    pub total_users: u64,
    pub total_orders: u64,
    pub total_services: u64,
    pub orders_by_status: BTreeMap<String, u64>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "NoMus API"),
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::users::register,
        crate::routes::users::get_by_telegram_id,
        crate::routes::users::update_language,
        crate::routes::orders::create,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::legacy::register,
        crate::routes::legacy::create_order,
        crate::routes::admin::users::list,
        crate::routes::admin::users::create,
        crate::routes::admin::users::get,
        crate::routes::admin::users::update,
        crate::routes::admin::users::delete,
        crate::routes::admin::users::orders,
        crate::routes::admin::orders::list,
        crate::routes::admin::orders::create,
        crate::routes::admin::orders::get,
        crate::routes::admin::orders::update,
        crate::routes::admin::orders::delete,
        crate::routes::admin::services::list,
        crate::routes::admin::services::create,
        crate::routes::admin::services::get,
        crate::routes::admin::services::update,
        crate::routes::admin::services::deactivate,
        crate::routes::admin::stats::get,
    ),
    components(
        schemas(
            HealthResponse,
            StatusMessageDoc,
            RegisterRequestDoc,
            RegistrationResponseDoc,
            LanguageUpdateDoc,
            UserDoc,
            CreateOrderDoc,
            OrderCreatedDoc,
            ServiceDoc,
            ServiceListDoc,
            NewServiceDoc,
            ServiceUpdateDoc,
            AdminUserListDoc,
            NewUserDoc,
            UserUpdateDoc,
            UserDeletedDoc,
            AdminOrderDoc,
            AdminOrderWithUserDoc,
            AdminOrderListDoc,
            NewAdminOrderDoc,
            OrderUpdateDoc,
            StatsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "orders"),
        (name = "services"),
        (name = "legacy"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
