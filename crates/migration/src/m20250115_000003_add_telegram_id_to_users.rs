//! Add nullable `users.telegram_id` with a unique index.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const IDX: &str = "ix_users_telegram_id";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .add_column(big_integer_null(Users::TelegramId))
                    .to_owned(),
            )
            .await?;

        // Postgres unique indexes allow many NULLs, which is what we want here
        manager
            .create_index(
                Index::create()
                    .name(IDX)
                    .table(Users::Table)
                    .col(Users::TelegramId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(IDX).table(Users::Table).to_owned())
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .drop_column(Users::TelegramId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Users { Table, TelegramId }
