//! Error types for signing and message encoding.

use thiserror::Error;

/// Errors raised while signing or verifying a parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The recomputed signature does not match the claimed one.
    #[error("Signature mismatch: claimed {claimed}, computed {computed}")]
    Mismatch { claimed: String, computed: String },

    /// The claimed signature is missing from the message.
    #[error("Signature missing")]
    Missing,

    /// The requested sign type is not one the gateway supports.
    #[error("Unsupported sign type: {0}")]
    UnsupportedSignType(String),
}

impl SignatureError {
    pub fn mismatch(claimed: impl Into<String>, computed: impl Into<String>) -> Self {
        SignatureError::Mismatch {
            claimed: claimed.into(),
            computed: computed.into(),
        }
    }

    pub fn unsupported_sign_type(name: impl Into<String>) -> Self {
        SignatureError::UnsupportedSignType(name.into())
    }
}

/// Errors raised while encoding or decoding the XML wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The document is not well-formed XML.
    #[error("Malformed XML: {0}")]
    Malformed(String),

    /// The document is well-formed but does not follow the `<xml>` leaf layout.
    #[error("Unexpected document structure: {0}")]
    UnexpectedStructure(String),

    /// The request could not be signed.
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

impl CodecError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        CodecError::Malformed(reason.into())
    }

    pub fn unexpected_structure(reason: impl Into<String>) -> Self {
        CodecError::UnexpectedStructure(reason.into())
    }
}
