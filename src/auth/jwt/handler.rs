//! Token issuing and verification

use super::types::Claims;
use crate::config::AuthConfig;
use crate::utils::error::{QualityError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;
const ISSUER: &str = "batch-quality";
const AUDIENCE: &str = "api";

/// Signs access tokens with the configured secret and checks them on the way back
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: u64,
}

impl fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtHandler")
            .field("issuer", &ISSUER)
            .field("lifetime", &self.lifetime)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl JwtHandler {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime: config.jwt_expiration,
        }
    }

    /// Token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.lifetime
    }

    /// Issue a token for an approved user
    pub fn create_access_token(&self, user_id: Uuid, username: &str) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| QualityError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now,
            exp: now + self.lifetime,
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(QualityError::Jwt)?;

        debug!("Issued token for {} ({})", username, user_id);
        Ok(token)
    }

    /// Check signature, issuer, audience and expiry
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            QualityError::Jwt(e)
        })?;

        Ok(data.claims)
    }
}
