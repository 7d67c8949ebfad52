//! Merchant credentials configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::merchant::Merchant;

use super::error::ValidationError;

/// Merchant credentials
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantConfig {
    /// Official account or open platform app id
    pub app_id: String,

    /// API key used for signing
    pub app_key: SecretString,

    /// Merchant id
    pub mch_id: String,

    /// API password, not used for signing
    pub app_secret: Option<SecretString>,
}

impl MerchantConfig {
    /// Validate merchant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.app_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("WEIXIN_PAY__MERCHANT__APP_ID"));
        }
        if self.app_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("WEIXIN_PAY__MERCHANT__APP_KEY"));
        }
        if self.mch_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("WEIXIN_PAY__MERCHANT__MCH_ID"));
        }
        Ok(())
    }

    /// Builds the merchant identity these credentials describe.
    pub fn to_merchant(&self) -> Merchant {
        Merchant::new(
            self.app_id.clone(),
            self.app_key.clone(),
            self.mch_id.clone(),
            self.app_secret.clone(),
        )
    }
}
