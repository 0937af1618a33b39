use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};

use crate::{
    auth::AuthUser,
    db::DB,
    extract::{Json, Path},
    state::AppState,
    Result,
};

use super::{handlers, CreateNote, Note, NoteId, UpdateNote};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/notes", get(find_notes).post(create_note))
        .route(
            "/api/notes/{note_id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .with_state(state)
}

async fn find_notes(State(db): State<DB>) -> Result<Json<Vec<Note>>> {
    handlers::find_notes(db).await.map(Json)
}

async fn create_note(
    State(db): State<DB>,
    AuthUser(owner): AuthUser,
    Json(args): Json<CreateNote>,
) -> Result<(StatusCode, Json<Note>)> {
    handlers::create_note(args, owner, db)
        .await
        .map(|note| (StatusCode::CREATED, Json(note)))
}

async fn get_note(Path(note_id): Path<NoteId>, State(db): State<DB>) -> Result<Json<Note>> {
    handlers::get_note(note_id, db).await.map(Json)
}

async fn update_note(
    Path(note_id): Path<NoteId>,
    State(db): State<DB>,
    Json(args): Json<UpdateNote>,
) -> Result<Json<Note>> {
    handlers::update_note(note_id, args, db).await.map(Json)
}

async fn delete_note(Path(note_id): Path<NoteId>, State(db): State<DB>) -> Result<StatusCode> {
    handlers::delete_note(note_id, db)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::{
        auth::{Claims, Identity, TokenKeys},
        config::Config,
        db::{init_test_db, DB},
        errors::{ErrorResponse, Result},
        notes::Note,
        tests::{seed_user, token_for},
    };

    const FIRST_ID: &str = "018f6138-5b4f-722d-97c5-29b927cedbd4";
    const SECOND_ID: &str = "018f6146-32f4-7f98-90b8-19fda2c87491";

    async fn seed_notes(db: &DB) {
        db.call(|conn| {
            conn.execute_batch(
                r#"
                INSERT INTO notes (id, content, important) VALUES (uuid_blob('018f6138-5b4f-722d-97c5-29b927cedbd4'), 'HTML is easy', 1);
                INSERT INTO notes (id, content, important) VALUES (uuid_blob('018f6146-32f4-7f98-90b8-19fda2c87491'), 'Browser can execute only JavaScript', 0);
                "#,
            )?;
            Ok(())
        })
        .await
        .unwrap();
    }

    async fn count_notes(db: &DB) -> u32 {
        db.call(|conn| {
            conn.query_row::<u32, _, _>("select count(*) from notes", [], |r| r.get(0))
                .map_err(|e| e.into())
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn find_notes_in_insertion_order() -> Result<()> {
        let db = init_test_db().await?;
        seed_notes(&db).await;

        let server = test_server(db).await?;
        let response = server.get("/api/notes").await;

        assert_eq!(response.status_code(), 200);
        let contents = response
            .json::<Vec<Note>>()
            .into_iter()
            .map(|n| n.content)
            .collect::<Vec<_>>();
        assert_eq!(contents, ["HTML is easy", "Browser can execute only JavaScript"]);
        Ok(())
    }

    #[tokio::test]
    async fn get_note() -> Result<()> {
        let db = init_test_db().await?;
        seed_notes(&db).await;

        let server = test_server(db).await?;
        let response = server.get(&format!("/api/notes/{FIRST_ID}")).await;

        assert_eq!(response.status_code(), 200);
        let note = response.json::<Note>();
        assert_eq!(note.content, "HTML is easy");
        assert!(note.important);
        Ok(())
    }

    #[tokio::test]
    async fn get_missing_note() -> Result<()> {
        let db = init_test_db().await?;

        let server = test_server(db).await?;
        let response = server.get(&format!("/api/notes/{FIRST_ID}")).await;

        assert_eq!(response.status_code(), 404);
        assert!(response.text().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_id() -> Result<()> {
        let db = init_test_db().await?;

        let server = test_server(db).await?;
        for response in [
            server.get("/api/notes/5a3d5da59070081a82a3445").await,
            server.delete("/api/notes/not-an-id").await,
            server.put("/api/notes/not-an-id").json(&json!({ "important": true })).await,
        ] {
            assert_eq!(response.status_code(), 400);
            assert_eq!(response.json::<ErrorResponse>().error, "malformatted id");
        }
        Ok(())
    }

    #[tokio::test]
    async fn create_note_with_token() -> Result<()> {
        let db = init_test_db().await?;
        let user = seed_user(&db, "root", "sekret").await;

        let server = test_server(db.clone()).await?;
        let response = server
            .post("/api/notes")
            .authorization_bearer(token_for(&user))
            .json(&json!({
                "content": "async/await simplifies making async calls",
                "important": true
            }))
            .await;

        assert_eq!(response.status_code(), 201);
        let note = response.json::<Note>();
        assert_eq!(note.user, Some(user.id));

        let fetched = server.get(&format!("/api/notes/{}", note.id)).await.json::<Note>();
        assert_eq!(fetched, note);
        assert_eq!(count_notes(&db).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn create_note_defaults_important_to_false() -> Result<()> {
        let db = init_test_db().await?;
        let user = seed_user(&db, "root", "sekret").await;

        let server = test_server(db).await?;
        let response = server
            .post("/api/notes")
            .authorization_bearer(token_for(&user))
            .json(&json!({ "content": "not that important" }))
            .await;

        assert_eq!(response.status_code(), 201);
        assert!(!response.json::<Note>().important);
        Ok(())
    }

    #[tokio::test]
    async fn create_note_without_content() -> Result<()> {
        let db = init_test_db().await?;
        seed_notes(&db).await;
        let user = seed_user(&db, "root", "sekret").await;

        let server = test_server(db.clone()).await?;
        let response = server
            .post("/api/notes")
            .authorization_bearer(token_for(&user))
            .json(&json!({ "important": true }))
            .await;

        assert_eq!(response.status_code(), 400);
        assert!(response.json::<ErrorResponse>().error.contains("`content` is required"));
        assert_eq!(count_notes(&db).await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn create_note_requires_token() -> Result<()> {
        let db = init_test_db().await?;

        let server = test_server(db.clone()).await?;
        let missing = server
            .post("/api/notes")
            .json(&json!({ "content": "no token at all" }))
            .await;
        assert_eq!(missing.status_code(), 401);
        assert_eq!(missing.json::<ErrorResponse>().error, "token invalid");

        let invalid = server
            .post("/api/notes")
            .authorization_bearer("garbage")
            .json(&json!({ "content": "garbage token" }))
            .await;
        assert_eq!(invalid.status_code(), 401);
        assert_eq!(invalid.json::<ErrorResponse>().error, "invalid token");

        assert_eq!(count_notes(&db).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn create_note_for_deleted_user() -> Result<()> {
        let db = init_test_db().await?;

        let token = TokenKeys::new(&Config::for_tests().secret, 3600)
            .issue(&Identity {
                id: Uuid::now_v7(),
                username: "ghost".into(),
            })
            .unwrap();

        let server = test_server(db.clone()).await?;
        let response = server
            .post("/api/notes")
            .authorization_bearer(token)
            .json(&json!({ "content": "owner no longer exists" }))
            .await;

        assert_eq!(response.status_code(), 401);
        assert_eq!(response.json::<Value>(), json!({ "error": "token invalid" }));
        assert_eq!(count_notes(&db).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn create_note_with_expired_token() -> Result<()> {
        let db = init_test_db().await?;
        let user = seed_user(&db, "root", "sekret").await;

        let now = chrono::Utc::now().timestamp();
        let token = TokenKeys::new(&Config::for_tests().secret, 3600)
            .sign(&Claims {
                username: user.username.clone(),
                id: Some(user.id),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        let server = test_server(db.clone()).await?;
        let response = server
            .post("/api/notes")
            .authorization_bearer(token)
            .json(&json!({ "content": "written too late" }))
            .await;

        assert_eq!(response.status_code(), 401);
        assert_eq!(response.json::<Value>(), json!({ "error": "token expired" }));
        assert_eq!(count_notes(&db).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn update_note() -> Result<()> {
        let db = init_test_db().await?;
        seed_notes(&db).await;

        let server = test_server(db).await?;
        let response = server
            .put(&format!("/api/notes/{SECOND_ID}"))
            .json(&json!({ "important": true }))
            .await;

        assert_eq!(response.status_code(), 200);
        let note = response.json::<Note>();
        assert_eq!(note.content, "Browser can execute only JavaScript");
        assert!(note.important);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_note() -> Result<()> {
        let db = init_test_db().await?;

        let server = test_server(db).await?;
        let response = server
            .put(&format!("/api/notes/{FIRST_ID}"))
            .json(&json!({ "content": "does not matter" }))
            .await;

        assert_eq!(response.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn delete_note() -> Result<()> {
        let db = init_test_db().await?;
        seed_notes(&db).await;

        let server = test_server(db.clone()).await?;
        let response = server.delete(&format!("/api/notes/{FIRST_ID}")).await;

        assert_eq!(response.status_code(), 204);
        assert_eq!(count_notes(&db).await, 1);

        let notes = server.get("/api/notes").await.json::<Vec<Note>>();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "Browser can execute only JavaScript");

        let response = server.get(&format!("/api/notes/{FIRST_ID}")).await;
        assert_eq!(response.status_code(), 404);

        let response = server.delete(&format!("/api/notes/{FIRST_ID}")).await;
        assert_eq!(response.status_code(), 404);
        Ok(())
    }

    async fn test_server(db: DB) -> Result<TestServer> {
        crate::tests::test_server(db, super::router).await
    }
}
