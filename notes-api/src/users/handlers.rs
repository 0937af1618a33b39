use std::collections::HashMap;

use rusqlite::{params, Row};

use crate::{auth, db, db::DB, validation, Error, Result};

use super::{NoteSummary, RegisterUser, User, UserId};

impl<'a> TryFrom<&Row<'a>> for User {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            name: row.get(2)?,
            notes: Vec::new(),
        })
    }
}

pub async fn register(db: DB, args: RegisterUser) -> Result<User> {
    let username = validation::username(args.username.as_deref())?.to_owned();
    let password = validation::password(args.password.as_deref())?.to_owned();
    let name = args.name;

    let password_hash = auth::hash(password).await?;

    db.call(move |conn| {
        conn.query_row(
            r#"INSERT INTO users (username, name, password_hash) VALUES (?, ?, ?)
            RETURNING id, username, name"#,
            params![username, name, password_hash],
            |row| User::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}

/// Every user with the notes they own, both in insertion order.
pub async fn find_users(db: DB) -> Result<Vec<User>> {
    db.call(|conn| {
        let mut users = conn
            .prepare("SELECT id, username, name FROM users ORDER BY rowid")?
            .query_map([], |row| User::try_from(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut notes: HashMap<UserId, Vec<NoteSummary>> = HashMap::new();
        let mut stmt =
            conn.prepare("SELECT user_id, id, content, important FROM notes WHERE user_id IS NOT NULL ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            let owner: UserId = row.get(0)?;
            let note = NoteSummary {
                id: row.get(1)?,
                content: row.get(2)?,
                important: row.get(3)?,
            };
            Ok((owner, note))
        })?;
        for row in rows {
            let (owner, note) = row?;
            notes.entry(owner).or_default().push(note);
        }

        for user in users.iter_mut() {
            user.notes = notes.remove(&user.id).unwrap_or_default();
        }

        Ok(users)
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}
