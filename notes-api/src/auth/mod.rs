mod backend;
mod errors;
mod password;
mod routes;
mod token;

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

pub use backend::{authenticate, Credentials, LoginResponse};
pub use errors::{Error, Result};
pub use password::{hash, verify};
pub use routes::router;
pub use token::{Claims, Identity, TokenKeys};

/// The caller identified by a valid `Authorization: Bearer` token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<TokenKeys>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = crate::Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenKeys>::from_ref(state);
        let token = bearer_token(&parts.headers).ok_or(Error::MissingToken)?;
        let identity = tokens.verify(token)?;

        Ok(Self(identity))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
