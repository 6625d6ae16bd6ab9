//! Seed the initial service catalog.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                INSERT INTO services (name, description, base_price, duration_minutes, is_active)
                VALUES
                    ('Classic massage', 'Relaxing full-body massage', 150000.00, 60, true),
                    ('Sports massage', 'Recovery massage after training', 180000.00, 60, true),
                    ('Back massage', 'Back, neck and shoulder massage', 100000.00, 30, true),
                    ('Anti-cellulite massage', 'Targeted problem-area massage', 200000.00, 45, true)
                "#,
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DELETE FROM services
                WHERE name IN ('Classic massage', 'Sports massage', 'Back massage', 'Anti-cellulite massage')
                "#,
            )
            .await?;
        Ok(())
    }
}
