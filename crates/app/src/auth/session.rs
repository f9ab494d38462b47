//! Signed session tokens.

use jiff::{Timestamp, ToSpan};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::users::records::{UserRecord, UserUuid};

/// Sessions last a week, matching the session cookie's max age.
const SESSION_TTL_HOURS: i64 = 24 * 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: String,
    exp: i64,
}

/// HS256 signing/verification keys derived from the configured secret.
#[derive(Clone)]
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionTokens(**redacted**)")
    }
}

impl SessionTokens {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub(crate) fn issue(
        &self,
        user: &UserRecord,
        now: Timestamp,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user.uuid.into_uuid(),
            role: user.role.as_str().to_string(),
            exp: (now + SESSION_TTL_HOURS.hours()).as_second(),
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a token's signature and expiry; returns the user it names.
    pub(crate) fn verify(&self, token: &str) -> Result<UserUuid, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;

        Ok(UserUuid::from_uuid(data.claims.sub))
    }
}
