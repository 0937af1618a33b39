use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::users::UserId;

use super::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub id: Option<UserId>,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 keys derived from the server secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            username: identity.username.clone(),
            id: Some(identity.id),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(Error::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<Identity> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                    Error::TokenExpired
                } else {
                    Error::InvalidToken(e)
                }
            })?
            .claims;

        let id = claims.id.ok_or(Error::TokenMissingIdentity)?;

        Ok(Identity {
            id,
            username: claims.username,
        })
    }
}
