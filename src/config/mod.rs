//! Application configuration module
//!
//! Configuration is read from environment variables with the `WEIXIN_PAY`
//! prefix using the `config` and `dotenvy` crates. Nested values use a
//! double underscore as separator.
//!
//! # Example
//!
//! ```no_run
//! use weixin_pay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let merchant = config.merchant.to_merchant();
//! println!("{}", merchant.qr_link("product-1"));
//! ```

mod error;
mod gateway;
mod merchant;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use merchant::MerchantConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Merchant credentials
    pub merchant: MerchantConfig,

    /// Gateway location and defaults
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WEIXIN_PAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `WEIXIN_PAY__MERCHANT__APP_ID=wx...` -> `merchant.app_id`
    /// - `WEIXIN_PAY__GATEWAY__BASE_URL=...` -> `gateway.base_url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or cannot be
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WEIXIN_PAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.merchant.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::TradeType;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("WEIXIN_PAY__MERCHANT__APP_ID", "wxd930ea5d5a258f4f");
        env::set_var("WEIXIN_PAY__MERCHANT__APP_KEY", "192006250b4c09247ec02edce69f6a2d");
        env::set_var("WEIXIN_PAY__MERCHANT__MCH_ID", "10000100");
    }

    fn clear_env() {
        env::remove_var("WEIXIN_PAY__MERCHANT__APP_ID");
        env::remove_var("WEIXIN_PAY__MERCHANT__APP_KEY");
        env::remove_var("WEIXIN_PAY__MERCHANT__MCH_ID");
        env::remove_var("WEIXIN_PAY__MERCHANT__APP_SECRET");
        env::remove_var("WEIXIN_PAY__GATEWAY__BASE_URL");
        env::remove_var("WEIXIN_PAY__GATEWAY__DEFAULT_TRADE_TYPE");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.merchant.app_id, "wxd930ea5d5a258f4f");
        assert_eq!(config.merchant.mch_id, "10000100");
        assert_eq!(
            config.merchant.app_key.expose_secret(),
            "192006250b4c09247ec02edce69f6a2d"
        );
        assert!(config.merchant.app_secret.is_none());
    }

    #[test]
    fn test_gateway_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gateway.base_url, "https://api.mch.weixin.qq.com");
        assert_eq!(config.gateway.default_trade_type, TradeType::Mweb);
        assert_eq!(config.gateway.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gateway_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("WEIXIN_PAY__GATEWAY__BASE_URL", "https://sandbox.example.com");
        env::set_var("WEIXIN_PAY__GATEWAY__DEFAULT_TRADE_TYPE", "NATIVE");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gateway.base_url, "https://sandbox.example.com");
        assert_eq!(config.gateway.default_trade_type, TradeType::Native);
    }

    #[test]
    fn test_missing_merchant_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_debug_does_not_leak_app_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let rendered = format!("{:?}", result.unwrap());
        assert!(!rendered.contains("192006250b4c09247ec02edce69f6a2d"));
    }
}
