use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, Orders); 4] = [
    ("idx_orders_user", Orders::UserId),
    ("idx_orders_service", Orders::ServiceId),
    ("idx_orders_status", Orders::Status),
    ("idx_orders_created_at", Orders::CreatedAt),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, col) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Orders::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }
        manager
            .create_index(
                Index::create()
                    .name("idx_services_active_name")
                    .table(Services::Table)
                    .col(Services::IsActive)
                    .col(Services::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_services_active_name").table(Services::Table).to_owned())
            .await?;
        for (name, _) in INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(Orders::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Orders { Table, UserId, ServiceId, Status, CreatedAt }

#[derive(DeriveIden)]
enum Services { Table, IsActive, Name }
