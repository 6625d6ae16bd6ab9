//! Create `services` catalog table.
//!
//! Rows are never hard-deleted by the application; `is_active` is flipped instead.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(pk_auto(Services::Id))
                    .col(string_len(Services::Name, 255))
                    .col(text_null(Services::Description))
                    .col(decimal_len_null(Services::BasePrice, 10, 2))
                    .col(integer_null(Services::DurationMinutes))
                    .col(boolean(Services::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Services::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Services::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Services::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Name,
    Description,
    BasePrice,
    DurationMinutes,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
