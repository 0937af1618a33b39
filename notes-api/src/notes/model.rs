use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::UserId;

pub type NoteId = Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub important: bool,
    pub user: Option<UserId>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CreateNote {
    pub content: Option<String>,
    pub important: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateNote {
    pub content: Option<String>,
    pub important: Option<bool>,
}
