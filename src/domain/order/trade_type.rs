//! Trade types and trade states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the buyer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    /// Buyer scans a merchant QR code.
    Native,
    /// In-app browser of the messenger (official accounts).
    Jsapi,
    /// Native mobile application.
    App,
    Wap,
    /// Mobile web browser outside the messenger.
    #[default]
    Mweb,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Native => "NATIVE",
            TradeType::Jsapi => "JSAPI",
            TradeType::App => "APP",
            TradeType::Wap => "WAP",
            TradeType::Mweb => "MWEB",
        }
    }
}

impl FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NATIVE" => Ok(TradeType::Native),
            "JSAPI" => Ok(TradeType::Jsapi),
            "APP" => Ok(TradeType::App),
            "WAP" => Ok(TradeType::Wap),
            "MWEB" => Ok(TradeType::Mweb),
            other => Err(format!("unknown trade type: {}", other)),
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state reported by an order query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeState {
    Success,
    Refund,
    NotPay,
    Closed,
    Revoked,
    UserPaying,
    PayError,
}

impl TradeState {
    /// Parses the gateway's `trade_state` token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "SUCCESS" => Some(TradeState::Success),
            "REFUND" => Some(TradeState::Refund),
            "NOTPAY" => Some(TradeState::NotPay),
            "CLOSED" => Some(TradeState::Closed),
            "REVOKED" => Some(TradeState::Revoked),
            "USERPAYING" => Some(TradeState::UserPaying),
            "PAYERROR" => Some(TradeState::PayError),
            _ => None,
        }
    }

    /// True once the order can no longer change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TradeState::NotPay | TradeState::UserPaying)
    }
}
