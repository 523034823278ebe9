//! Token issuing and password hashing.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::ServerError;

/// Lifetime of an access token.
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// JWT payload. `sub` carries the user's email.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// HS256 key pair derived from the configured secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, email: &str) -> Result<String, ServerError> {
        let exp = Utc::now() + Duration::minutes(TOKEN_TTL_MINUTES);
        let claims = Claims {
            sub: email.to_string(),
            exp: exp.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| ServerError::Generic(err.to_string()))
    }

    /// Returns the email carried by a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Option<String> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims.sub)
            .ok()
    }
}

pub fn hash_password(password: &str) -> Result<String, ServerError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|err| ServerError::Generic(err.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
