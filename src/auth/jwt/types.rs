//! Access token claims

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims signed into every access token
///
/// Only `sub` is trusted when a request comes back; the account itself is
/// reloaded so approval and deletion take effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    /// Username at issue time, informational only
    pub username: String,
    pub iat: u64,
    pub exp: u64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

impl Claims {
    /// Seconds the token stays valid after `now`, zero once expired
    pub fn remaining(&self, now: u64) -> u64 {
        self.exp.saturating_sub(now)
    }
}
