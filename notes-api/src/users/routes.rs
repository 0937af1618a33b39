use axum::{extract::State, http::StatusCode, routing::get, Router};

use crate::{db::DB, extract::Json, state::AppState, Result};

use super::{handlers, RegisterUser, User};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(find_users).post(register))
        .with_state(state)
}

async fn find_users(State(db): State<DB>) -> Result<Json<Vec<User>>> {
    handlers::find_users(db).await.map(Json)
}

async fn register(State(db): State<DB>, Json(args): Json<RegisterUser>) -> Result<(StatusCode, Json<User>)> {
    handlers::register(db, args)
        .await
        .map(|user| (StatusCode::CREATED, Json(user)))
}
