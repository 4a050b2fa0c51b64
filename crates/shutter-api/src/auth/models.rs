//! JWT claim types.

use serde::{Deserialize, Serialize};

/// Claims extracted from a validated bearer token.
///
/// Only standard claims are read; the gateway does no per-user
/// authorization beyond "the token is valid and unexpired".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user or client identity)
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiration time (seconds since epoch)
    pub exp: usize,
    /// Issuer
    #[serde(default)]
    pub iss: Option<String>,
    /// Audience
    #[serde(default)]
    pub aud: Option<serde_json::Value>,
}
