use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::Claims;
use super::errors::TokenError;

/// Signed, expiring token codec.
///
/// Generic over the claims type so services define their own token payload.
/// Uses HS256 (HMAC with SHA-256) with a single shared secret. Every token
/// carries an audience naming its kind; decoding with another audience fails,
/// so a token minted for one purpose is never accepted for another.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Inject the secret from configuration, never read it ad hoc
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a token expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `audience` - Token kind, must match on decode
    /// * `claims` - Custom claims to embed
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(
        &self,
        audience: &str,
        claims: &T,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        self.encode_issued_at(audience, claims, ttl, Utc::now())
    }

    /// Encode claims into a token issued at an explicit instant.
    ///
    /// Expiry is `issued_at + ttl`. Passing an instant in the past yields a
    /// token that is already aged.
    pub fn encode_issued_at<T: Serialize>(
        &self,
        audience: &str,
        claims: &T,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::new(audience, claims, issued_at, ttl);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Signature, structure, audience and expiry are all checked, with no
    /// leeway on expiry. Decoding has no side effects.
    ///
    /// # Arguments
    /// * `audience` - Expected token kind
    /// * `token` - Token string to decode
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Expired` - Expiry has elapsed
    /// * `Invalid` - Signature, structure, audience or claims shape is wrong
    pub fn decode<T: DeserializeOwned>(
        &self,
        audience: &str,
        token: &str,
    ) -> Result<Claims<T>, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "aud"]);

        let token_data =
            decode::<Claims<T>>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
