use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
    pub notes: Vec<NoteSummary>,
}

/// The part of an owned note shown in user listings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NoteSummary {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
}

#[derive(Deserialize, Default)]
pub struct RegisterUser {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUser")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("password", &"[redacted]")
            .finish()
    }
}
