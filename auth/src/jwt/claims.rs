use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Signed token payload.
///
/// Wraps service-defined custom claims with the registered claims the codec
/// manages itself. Custom claims are flattened into the token body, so a
/// `{ "phoneNumber": ... }` struct ends up next to `aud`, `iat`, `exp` and `jti`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims<T> {
    /// Audience (token kind, checked on decode)
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,

    /// Service-defined claims
    #[serde(flatten)]
    pub custom: T,
}

impl<T> Claims<T> {
    /// Create claims expiring `ttl` after `issued_at`.
    ///
    /// # Arguments
    /// * `audience` - Token kind the claims are meant for
    /// * `custom` - Service-defined claims
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with iat, exp and a fresh random jti
    pub fn new(audience: &str, custom: T, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            aud: audience.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            custom,
        }
    }

    /// Expiration as a UTC instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Consume claims and return the service-defined part.
    pub fn into_custom(self) -> T {
        self.custom
    }
}
