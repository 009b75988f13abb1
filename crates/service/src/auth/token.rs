use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::AuthError;
use crate::policy::{Identity, Role};

/// HS256 claims carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

pub fn issue(secret: &str, ttl_hours: i64, user_id: Uuid, role: Role) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = Duration::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AuthError::TokenError(format!("token ttl of {ttl_hours}h is out of range")))?;
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };
    encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Check signature and expiry, then turn the claims into an [`Identity`].
pub fn verify(secret: &str, token: &str) -> Result<Identity, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| AuthError::InvalidToken)?;
    let id = Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
    Ok(Identity::new(id, data.claims.role))
}
