//! Stateless bearer tokens.
//!
//! There is no server-side session store: a token is valid exactly when
//! its HMAC signature checks out and its expiry has not passed.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Tokens expire 24 hours after issuance.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims embedded in every issued token.
///
/// Carries enough identity for `verify` and the admin check without a
/// database read. A promoted/demoted account must log in again for
/// `is_admin` to update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue(
    secret: &str,
    user: &engine::users::Model,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        id: user.id,
        username: user.username.clone(),
        is_admin: user.is_admin,
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}
