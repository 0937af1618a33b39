use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Request,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{auth, db, validation::ValidationError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not_found")]
    NotFound(String),

    // request
    #[error("malformatted id")]
    InvalidId(PathRejection),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", .0.body_text())]
    JsonBody(JsonRejection),
    #[error("{0}")]
    BadRequest(String),
    #[error("expected `{0}` to be unique")]
    Conflict(String),
    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    // auth
    #[error(transparent)]
    Auth(#[from] auth::Error),

    #[error(transparent)]
    DB(db::Error),

    // startup
    #[error("config: {0}")]
    Config(#[from] envy::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::JsonBody(rejection)
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidId(rejection)
    }
}

impl From<db::Error> for Error {
    fn from(error: db::Error) -> Self {
        match error {
            db::Error::NotFound(msg) => Self::NotFound(msg),
            db::Error::UniqueViolation(column) => Self::Conflict(column),
            error => Self::DB(error),
        }
    }
}

// Response

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip)]
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            status,
        }
    }
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        match error {
            Error::NotFound(_) => ErrorResponse::new("", 404),
            Error::InvalidId(_) => ErrorResponse::new("malformatted id", 400),
            Error::Validation(error) => ErrorResponse::new(error.to_string(), 400),
            Error::JsonBody(rejection) => ErrorResponse::new(rejection.body_text(), 400),
            Error::BadRequest(message) => ErrorResponse::new(message, 400),
            Error::Conflict(_) => ErrorResponse::new(error.to_string(), 400),
            Error::PayloadTooLarge(_) => ErrorResponse::new("request entity too large", 413),
            Error::Auth(error) => match error {
                auth::Error::InvalidCredentials => ErrorResponse::new("invalid username or password", 401),
                auth::Error::InvalidToken(_) => ErrorResponse::new("invalid token", 401),
                auth::Error::TokenExpired => ErrorResponse::new("token expired", 401),
                auth::Error::MissingToken | auth::Error::TokenMissingIdentity | auth::Error::UnknownUser(_) => {
                    ErrorResponse::new("token invalid", 401)
                }
                _ => ErrorResponse::new("internal server error", 500),
            },
            _ => ErrorResponse::new("internal server error", 500),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let error = Arc::new(self);

        let error_res = ErrorResponse::from(error.as_ref());
        let status = StatusCode::from_u16(error_res.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut res = if status == StatusCode::NOT_FOUND {
            status.into_response()
        } else {
            (status, axum::Json(error_res)).into_response()
        };
        res.extensions_mut().insert(error);

        res
    }
}

pub async fn on_error(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let error = response.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    if let Some(error) = error {
        if response.status().is_server_error() {
            tracing::error!("{:?}", error);
        } else {
            tracing::info!("{}", error);
        }
    }

    response
}
