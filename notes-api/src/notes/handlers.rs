use rusqlite::{params, OptionalExtension, Row};

use crate::{
    auth::{self, Identity},
    db::{self, DB},
    users::UserId,
    validation, Error, Result,
};

use super::{CreateNote, Note, NoteId, UpdateNote};

impl<'a> TryFrom<&Row<'a>> for Note {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            content: row.get(1)?,
            important: row.get(2)?,
            user: row.get(3)?,
        })
    }
}

pub async fn find_notes(db: DB) -> Result<Vec<Note>> {
    db.call(|conn| {
        let notes = conn
            .prepare("SELECT id, content, important, user_id FROM notes ORDER BY rowid")?
            .query_map([], |row| Note::try_from(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(notes)
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}

pub async fn get_note(note_id: NoteId, db: DB) -> Result<Note> {
    db.call(move |conn| {
        let note = conn.query_row(
            "SELECT id, content, important, user_id FROM notes WHERE id = ?",
            params![note_id],
            |row| Note::try_from(row),
        )?;
        Ok(note)
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}

/// The owner check and the insert share one transaction, so a note is only
/// stored when its owner exists.
pub async fn create_note(CreateNote { content, important }: CreateNote, owner: Identity, db: DB) -> Result<Note> {
    let content = validation::note_content(content.as_deref())?.to_owned();
    let important = important.unwrap_or(false);
    let owner_id = owner.id;

    let note = db
        .call(move |conn| {
            let tx = conn.transaction()?;

            let owner = tx
                .query_row("SELECT id FROM users WHERE id = ?", params![owner_id], |row| {
                    row.get::<_, UserId>(0)
                })
                .optional()?;
            if owner.is_none() {
                return Ok(None);
            }

            let note = tx.query_row(
                r#"INSERT INTO notes (content, important, user_id) VALUES (?, ?, ?)
                RETURNING id, content, important, user_id"#,
                params![content, important, owner_id],
                |row| Note::try_from(row),
            )?;
            tx.commit()?;

            Ok(Some(note))
        })
        .await
        .map_err(db::Error::from)?
        .ok_or(auth::Error::UnknownUser(owner_id))?;

    tracing::debug!("note {} created by {}", note.id, owner.username);

    Ok(note)
}

pub async fn update_note(note_id: NoteId, UpdateNote { content, important }: UpdateNote, db: DB) -> Result<Note> {
    if content.is_some() {
        validation::note_content(content.as_deref())?;
    }

    db.call(move |conn| {
        conn.query_row(
            r#"UPDATE notes SET content = coalesce(?, content), important = coalesce(?, important), updated_at = ?
            WHERE id = ?
            RETURNING id, content, important, user_id"#,
            params![content, important, chrono::Utc::now(), note_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}

pub async fn delete_note(note_id: NoteId, db: DB) -> Result<Note> {
    db.call(move |conn| {
        conn.query_row(
            r#"DELETE FROM notes
            WHERE id = ?
            RETURNING id, content, important, user_id"#,
            params![note_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}
