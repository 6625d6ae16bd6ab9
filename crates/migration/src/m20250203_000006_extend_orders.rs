//! Link orders to the catalog and add booking details.
//!
//! `service_id` is a weak reference: deleting a service nulls it (ON DELETE SET NULL).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const FK: &str = "fk_orders_service";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Orders::Table)
                    .add_column(integer_null(Orders::ServiceId))
                    .add_column(text_null(Orders::AddressText))
                    .add_column(timestamp_with_time_zone_null(Orders::ScheduledAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK)
                    .from(Orders::Table, Orders::ServiceId)
                    .to(Services::Table, Services::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .on_update(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(ForeignKey::drop().name(FK).table(Orders::Table).to_owned())
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Orders::Table)
                    .drop_column(Orders::ScheduledAt)
                    .drop_column(Orders::AddressText)
                    .drop_column(Orders::ServiceId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Orders { Table, ServiceId, AddressText, ScheduledAt }

#[derive(DeriveIden)]
enum Services { Table, Id }
