//! JWT claims types

use serde::{Deserialize, Serialize};

/// JWT claims carried by Jobly bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoblyClaims {
    /// Username of the token holder
    pub username: String,
    /// Whether the holder may perform admin-only operations
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}
