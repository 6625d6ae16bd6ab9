use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub phone_number: String,
    /// Messaging-platform (Telegram) account id; unique when present.
    #[sea_orm(unique)]
    pub telegram_id: Option<i64>,
    pub language_code: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

pub const PHONE_MIN_LEN: usize = 5;
pub const PHONE_MAX_LEN: usize = 20;
pub const LANGUAGE_CODE_MAX_LEN: usize = 5;

/// Trim and check a phone number: 5..=20 characters, digits with an optional leading `+`.
pub fn validate_phone(phone: &str) -> Result<String, ModelError> {
    let phone = phone.trim();
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if phone.len() < PHONE_MIN_LEN || phone.len() > PHONE_MAX_LEN {
        return Err(ModelError::Validation(format!(
            "phone_number must be {PHONE_MIN_LEN}..={PHONE_MAX_LEN} characters"
        )));
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ModelError::Validation("phone_number may only contain digits and a leading '+'".into()));
    }
    Ok(phone.to_string())
}

/// Short language tag such as `ru`, `uz`, `en-US`.
pub fn validate_language_code(code: &str) -> Result<String, ModelError> {
    let code = code.trim();
    if code.len() < 2 || code.len() > LANGUAGE_CODE_MAX_LEN {
        return Err(ModelError::Validation(format!(
            "language_code must be 2..={LANGUAGE_CODE_MAX_LEN} characters"
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return Err(ModelError::Validation("language_code may only contain letters and '-'".into()));
    }
    Ok(code.to_string())
}

pub async fn find_by_phone<C: ConnectionTrait>(db: &C, phone: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::PhoneNumber.eq(phone))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn find_by_telegram_id<C: ConnectionTrait>(db: &C, telegram_id: i64) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::TelegramId.eq(telegram_id))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    phone: &str,
    telegram_id: Option<i64>,
    language_code: Option<&str>,
) -> Result<Model, ModelError> {
    let phone = validate_phone(phone)?;
    let language_code = language_code.map(validate_language_code).transpose()?;
    let am = ActiveModel {
        phone_number: Set(phone),
        telegram_id: Set(telegram_id),
        language_code: Set(language_code),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_is_trimmed_and_accepted() {
        assert_eq!(validate_phone("  +998900000001 ").unwrap(), "+998900000001");
        assert_eq!(validate_phone("998900000001").unwrap(), "998900000001");
    }

    #[test]
    fn phone_length_bounds_count_characters() {
        assert_eq!(validate_phone("+1234").unwrap(), "+1234");
        assert_eq!(validate_phone("12345").unwrap(), "12345");
        assert!(validate_phone("1234").is_err());
        assert!(validate_phone("+1234567890123456789").is_ok());
        assert!(validate_phone("+12345678901234567890").is_err());
    }

    #[test]
    fn phone_rejects_garbage() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("+12").is_err());
        assert!(validate_phone("+99890abc0001").is_err());
        assert!(validate_phone("+123456789012345678901").is_err());
    }

    #[test]
    fn language_code_bounds() {
        assert_eq!(validate_language_code("uz").unwrap(), "uz");
        assert_eq!(validate_language_code("en-US").unwrap(), "en-US");
        assert!(validate_language_code("x").is_err());
        assert!(validate_language_code("english").is_err());
        assert!(validate_language_code("r1").is_err());
    }
}
