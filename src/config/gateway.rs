//! Gateway configuration

use serde::Deserialize;

use crate::domain::order::TradeType;
use crate::ports::GatewayEndpoints;

use super::error::ValidationError;

/// Gateway location and request defaults
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Trade type for orders that leave it unset
    #[serde(default)]
    pub default_trade_type: TradeType,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    "https://api.mch.weixin.qq.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_trade_type: TradeType::default(),
            log_level: default_log_level(),
        }
    }
}

impl GatewayConfig {
    /// Absolute URLs of the gateway operations
    pub fn endpoints(&self) -> GatewayEndpoints {
        GatewayEndpoints::from_base(&self.base_url)
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("WEIXIN_PAY__GATEWAY__BASE_URL"));
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        Ok(())
    }
}
