use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use models::user;
use crate::errors::ServiceError;
use crate::registration::domain::UserChanges;
use crate::registration::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::find_by_phone(&self.db, phone).await?)
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::find_by_telegram_id(&self.db, telegram_id).await?)
    }

    async fn insert(&self, phone: &str, telegram_id: Option<i64>, language_code: Option<&str>) -> Result<user::Model, ServiceError> {
        Ok(user::create(&self.db, phone, telegram_id, language_code).await?)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<user::Model, ServiceError> {
        let mut am: user::ActiveModel = user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?
            .into();
        if let Some(tg) = changes.telegram_id.into_change() {
            am.telegram_id = Set(tg);
        }
        if let Some(lang) = changes.language_code.into_change() {
            am.language_code = Set(lang);
        }
        Ok(am.update(&self.db).await?)
    }
}
