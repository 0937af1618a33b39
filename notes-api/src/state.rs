use std::sync::Arc;

use axum::extract::FromRef;

use crate::{auth::TokenKeys, config::Config, db::DB};

#[derive(FromRef, Clone)]
pub struct AppState {
    pub conn: DB,
    pub tokens: Arc<TokenKeys>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(conn: DB, config: Config) -> Self {
        let tokens = TokenKeys::new(&config.secret, config.token_ttl_secs);

        Self {
            conn,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}
