use rusqlite::Row;
use serde::Deserialize;

use crate::db::{self, DB};

use super::UserId;

/// A user row including the password hash. Never serialized.
#[derive(Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("name", &self.name)
            .field("password_hash", &"[redacted]")
            .finish()
    }
}

impl<'a> TryFrom<&Row<'a>> for UserCredentials {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            name: row.get(2)?,
            password_hash: row.get(3)?,
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GetUserByUsernameParameters {
    pub username: String,
}

pub async fn find_one_by_username(db: DB, args: GetUserByUsernameParameters) -> db::Result<UserCredentials> {
    let username = args.username.to_owned();
    let user = db
        .call(|conn| {
            conn.query_row(
                "SELECT id, username, name, password_hash FROM users WHERE username = ?",
                [args.username],
                |r| UserCredentials::try_from(r),
            )
            .map_err(|e| e.into())
        })
        .await
        .map_err(db::Error::from)
        .map_err(|e| e.not_found_message(format!("User '{}' not found", username)))?;

    Ok(user)
}
