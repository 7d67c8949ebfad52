//! Signature schemes accepted by the gateway.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SignatureError;

/// MAC algorithm used to sign a parameter set.
///
/// Parsing is case-insensitive and only accepts the two names the gateway
/// documents; anything else is rejected instead of silently falling back to
/// HMAC-SHA256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignType {
    /// MD5 over `query&key=secret`.
    #[default]
    #[serde(rename = "MD5")]
    Md5,

    /// HMAC-SHA256 over `query&key=secret`, keyed with the secret.
    #[serde(rename = "HMAC-SHA256")]
    HmacSha256,
}

impl SignType {
    /// Wire name, as sent in the `sign_type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Md5 => "MD5",
            SignType::HmacSha256 => "HMAC-SHA256",
        }
    }

    /// Parses an optional wire name, defaulting to MD5 when absent or empty.
    pub fn parse_or_default(name: Option<&str>) -> Result<Self, SignatureError> {
        match name {
            None => Ok(SignType::default()),
            Some(n) if n.trim().is_empty() => Ok(SignType::default()),
            Some(n) => n.parse(),
        }
    }
}

impl FromStr for SignType {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("md5") {
            Ok(SignType::Md5)
        } else if trimmed.eq_ignore_ascii_case("hmac-sha256") {
            Ok(SignType::HmacSha256)
        } else {
            Err(SignatureError::unsupported_sign_type(s))
        }
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
