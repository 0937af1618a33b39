//! Routes for end-to-end test runs. Only mounted when `TESTING_ROUTES` is set.

use axum::{extract::State, http::StatusCode, routing::post, Router};

use crate::{db, db::DB, state::AppState, Error, Result};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/testing/reset", post(reset))
        .with_state(state)
}

async fn reset(State(db): State<DB>) -> Result<StatusCode> {
    db.call(|conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM notes", [])?;
        tx.execute("DELETE FROM users", [])?;
        tx.commit()?;
        Ok(())
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)?;

    tracing::warn!("database reset");

    Ok(StatusCode::NO_CONTENT)
}
