use async_trait::async_trait;
use models::user;

use super::domain::UserChanges;
use crate::errors::ServiceError;

/// Repository abstraction for user identity persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, ServiceError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<user::Model>, ServiceError>;
    /// Unique violations on phone or telegram id surface as `ServiceError::Conflict`.
    async fn insert(&self, phone: &str, telegram_id: Option<i64>, language_code: Option<&str>) -> Result<user::Model, ServiceError>;
    async fn update(&self, id: i32, changes: UserChanges) -> Result<user::Model, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        users: BTreeMap<i32, user::Model>, // key: id
        next_id: i32,
        pending_races: usize,
    }

    impl State {
        fn check_unique(&self, skip_id: Option<i32>, phone: &str, telegram_id: Option<i64>) -> Result<(), ServiceError> {
            for u in self.users.values().filter(|u| Some(u.id) != skip_id) {
                if u.phone_number == phone {
                    return Err(ServiceError::Conflict(format!("phone_number {phone} already exists")));
                }
                if telegram_id.is_some() && u.telegram_id == telegram_id {
                    return Err(ServiceError::Conflict("telegram_id already exists".into()));
                }
            }
            Ok(())
        }

        fn push(&mut self, phone: &str, telegram_id: Option<i64>, language_code: Option<&str>) -> user::Model {
            self.next_id += 1;
            let now = Utc::now().into();
            let u = user::Model {
                id: self.next_id,
                phone_number: phone.to_string(),
                telegram_id,
                language_code: language_code.map(str::to_string),
                created_at: now,
                updated_at: now,
            };
            self.users.insert(u.id, u.clone());
            u
        }
    }

    #[derive(Default)]
    pub struct MockUserRepository {
        state: Mutex<State>,
    }

    impl MockUserRepository {
        /// The next `n` inserts lose a race: a concurrent request stores the
        /// same phone first and the insert fails with a conflict.
        pub fn simulate_insert_races(&self, n: usize) {
            self.state.lock().unwrap().pending_races = n;
        }

        pub fn users(&self) -> Vec<user::Model> {
            self.state.lock().unwrap().users.values().cloned().collect()
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.state.lock().unwrap().users.get(&id).cloned())
        }

        async fn find_by_phone(&self, phone: &str) -> Result<Option<user::Model>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.users.values().find(|u| u.phone_number == phone).cloned())
        }

        async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<user::Model>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.users.values().find(|u| u.telegram_id == Some(telegram_id)).cloned())
        }

        async fn insert(&self, phone: &str, telegram_id: Option<i64>, language_code: Option<&str>) -> Result<user::Model, ServiceError> {
            let mut state = self.state.lock().unwrap();
            if state.pending_races > 0 {
                state.pending_races -= 1;
                if state.check_unique(None, phone, None).is_ok() {
                    state.push(phone, None, None);
                }
            }
            state.check_unique(None, phone, telegram_id)?;
            Ok(state.push(phone, telegram_id, language_code))
        }

        async fn update(&self, id: i32, changes: UserChanges) -> Result<user::Model, ServiceError> {
            let mut state = self.state.lock().unwrap();
            let mut u = state.users.get(&id).cloned().ok_or_else(|| ServiceError::not_found("User", id))?;
            if let Some(tg) = changes.telegram_id.into_change() {
                u.telegram_id = tg;
            }
            if let Some(lang) = changes.language_code.into_change() {
                u.language_code = lang;
            }
            state.check_unique(Some(id), &u.phone_number, u.telegram_id)?;
            u.updated_at = Utc::now().into();
            state.users.insert(id, u.clone());
            Ok(u)
        }
    }
}
