//! Transport port for reaching the payment gateway.
//!
//! The signing core hands over a rendered XML body and expects the raw reply
//! bytes back. Retries, timeouts and connection reuse belong to the adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for posting signed documents to the gateway.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// POSTs `body` to `url` and returns the reply body.
    async fn post_bytes(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}

/// Gateway API paths.
pub const UNIFIED_ORDER_PATH: &str = "/pay/unifiedorder";
pub const CLOSE_ORDER_PATH: &str = "/pay/closeorder";
pub const ORDER_QUERY_PATH: &str = "/pay/orderquery";

/// Absolute URLs of the gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEndpoints {
    pub place_order: String,
    pub close_order: String,
    pub query_order: String,
}

impl GatewayEndpoints {
    /// Derives every endpoint from a base URL such as
    /// `https://api.mch.weixin.qq.com`.
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            place_order: format!("{}{}", base, UNIFIED_ORDER_PATH),
            close_order: format!("{}{}", base, CLOSE_ORDER_PATH),
            query_order: format!("{}{}", base, ORDER_QUERY_PATH),
        }
    }
}

/// Errors from the transport. Passed through to callers untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportError {
    pub code: TransportErrorCode,
    pub message: String,
    /// HTTP status, when the gateway answered at all.
    pub status: Option<u16>,
    /// Hint for callers that retry at a higher layer.
    pub retryable: bool,
}

impl TransportError {
    pub fn new(code: TransportErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorCode::Network, message)
    }

    /// Non-2xx reply. Server errors are retryable, client errors are not.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            retryable: status >= 500,
            ..Self::new(TransportErrorCode::HttpStatus, message)
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(TransportErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({}): {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for TransportError {}

/// Transport error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorCode {
    /// Connection, DNS or timeout failure.
    Network,
    /// The gateway answered with a non-2xx status.
    HttpStatus,
    /// The reply body could not be read.
    InvalidResponse,
}

impl TransportErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportErrorCode::Network)
    }
}

impl std::fmt::Display for TransportErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransportErrorCode::Network => "network_error",
            TransportErrorCode::HttpStatus => "http_status",
            TransportErrorCode::InvalidResponse => "invalid_response",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_transport_is_object_safe() {
        fn _accepts_dyn(_transport: &dyn GatewayTransport) {}
    }

    #[test]
    fn endpoints_join_base_and_paths() {
        let endpoints = GatewayEndpoints::from_base("https://api.mch.weixin.qq.com/");

        assert_eq!(endpoints.place_order, "https://api.mch.weixin.qq.com/pay/unifiedorder");
        assert_eq!(endpoints.close_order, "https://api.mch.weixin.qq.com/pay/closeorder");
        assert_eq!(endpoints.query_order, "https://api.mch.weixin.qq.com/pay/orderquery");
    }

    #[test]
    fn network_errors_are_retryable() {
        assert!(TransportError::network("connection reset").retryable);
        assert!(!TransportError::invalid_response("truncated").retryable);
    }

    #[test]
    fn only_server_status_errors_are_retryable() {
        assert!(TransportError::http_status(503, "unavailable").retryable);
        assert!(!TransportError::http_status(404, "not found").retryable);
    }

    #[test]
    fn display_includes_code_and_status() {
        let err = TransportError::http_status(502, "bad gateway");
        assert_eq!(err.to_string(), "http_status (502): bad gateway");

        let err = TransportError::network("timeout");
        assert_eq!(err.to_string(), "network_error: timeout");
    }
}
