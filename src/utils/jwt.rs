use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::entities::user::UserRole;
use crate::error::{AppError, AppResult};

/// Access-token claims as issued by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(alias = "userId", alias = "_id")]
    pub id: String, // user id
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// How far the session layer trusts the access token it finds in the cookie.
#[derive(Debug, Clone)]
pub enum TokenTrust {
    /// Decode only; the backend re-verifies the token on every proxied call.
    Unverified,
    /// Check the HS256 signature with the shared secret.
    Verified(String),
}

pub fn decode_access_token(token: &str, trust: &TokenTrust) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    let key = match trust {
        TokenTrust::Verified(secret) => DecodingKey::from_secret(secret.as_bytes()),
        TokenTrust::Unverified => {
            validation.insecure_disable_signature_validation();
            DecodingKey::from_secret(&[])
        }
    };

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}
