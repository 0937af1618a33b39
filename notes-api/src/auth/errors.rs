use crate::{db, users::UserId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("token expired")]
    TokenExpired,
    #[error("token has no user id")]
    TokenMissingIdentity,
    #[error("token user '{0}' does not exist")]
    UnknownUser(UserId),

    #[error("password hash: {0}")]
    PasswordHash(String),
    #[error("token signing: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error(transparent)]
    DB(#[from] db::Error),

    #[error("blocking task: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
