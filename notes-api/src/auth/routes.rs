use std::sync::Arc;

use axum::{extract::State, routing::post, Router};

use crate::{
    db::DB,
    extract::Json,
    state::AppState,
    Result,
};

use super::{backend, Credentials, LoginResponse, TokenKeys};

pub fn router(state: AppState) -> Router {
    Router::new().route("/api/login", post(login)).with_state(state)
}

async fn login(
    State(db): State<DB>,
    State(tokens): State<Arc<TokenKeys>>,
    Json(creds): Json<Credentials>,
) -> Result<Json<LoginResponse>> {
    let res = backend::authenticate(db, &tokens, creds).await?;
    Ok(Json(res))
}
