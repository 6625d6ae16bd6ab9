use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness payload served at `/`.
#[derive(Serialize, Deserialize, Debug)]
pub struct RootMessage {
    pub message: &'static str,
}

/// `{"status": "ok", "message": ...}` envelope used by mutating endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub status: String,
    pub message: String,
}

impl StatusMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { status: "ok".into(), message: message.into() }
    }
}
