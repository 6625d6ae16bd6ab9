use serde::{Deserialize, Serialize};

use crate::patch::Patch;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub phone_number: String,
    pub telegram_id: Option<i64>,
    pub language_code: Option<String>,
}

/// Field changes applied to an existing user row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub telegram_id: Patch<i64>,
    pub language_code: Patch<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.telegram_id.is_missing() && self.language_code.is_missing()
    }
}
