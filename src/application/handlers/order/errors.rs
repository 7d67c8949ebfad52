//! Errors raised by order handlers.

use thiserror::Error;

use crate::domain::order::OrderValidationError;
use crate::domain::signing::{CodecError, SignatureError};
use crate::ports::TransportError;

#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("Merchant credentials are incomplete")]
    InvalidMerchant,

    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderValidationError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// The reply claimed success but its signature did not check out.
    #[error("Gateway reply rejected: {0}")]
    Signature(#[from] SignatureError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl OrderError {
    /// Whether a caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Transport(e) if e.retryable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_retryable_transport_errors_are_retryable() {
        assert!(OrderError::from(TransportError::network("reset")).is_retryable());
        assert!(!OrderError::from(TransportError::http_status(400, "bad")).is_retryable());
        assert!(!OrderError::from(SignatureError::Missing).is_retryable());
        assert!(!OrderError::InvalidMerchant.is_retryable());
    }

    #[test]
    fn signature_error_message_is_preserved() {
        let err = OrderError::from(SignatureError::mismatch("AAA", "BBB"));
        assert_eq!(
            err.to_string(),
            "Gateway reply rejected: Signature mismatch: claimed AAA, computed BBB"
        );
    }
}
