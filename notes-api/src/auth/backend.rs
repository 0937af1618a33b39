use serde::{Deserialize, Serialize};

use crate::{
    db::DB,
    users::auth::{find_one_by_username, GetUserByUsernameParameters},
};

use super::{password, Error, Identity, Result, TokenKeys};

#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

pub async fn authenticate(db: DB, tokens: &TokenKeys, creds: Credentials) -> Result<LoginResponse> {
    let user = find_one_by_username(
        db,
        GetUserByUsernameParameters {
            username: creds.username.clone(),
        },
    )
    .await
    .map_err(|e| match e {
        crate::db::Error::NotFound(_) => Error::InvalidCredentials,
        e => Error::DB(e),
    })?;

    if !password::verify(creds.password, user.password_hash.clone()).await? {
        return Err(Error::InvalidCredentials);
    }

    let token = tokens.issue(&Identity {
        id: user.id,
        username: user.username.clone(),
    })?;

    tracing::info!("{} logged in", user.username);

    Ok(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    })
}
