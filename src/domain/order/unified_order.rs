//! Unified order request.

use serde::Serialize;

use crate::domain::signing::{new_nonce, Field, SignType, SignableFields};

use super::{OrderValidationError, TradeType};

/// A unified order as sent to `/pay/unifiedorder`.
///
/// `appid`, `mch_id` and `nonce_str` may be left empty; the placing handler
/// fills them from the merchant. `None` fields are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifiedOrder {
    pub appid: String,
    pub mch_id: String,
    pub device_info: Option<String>,
    pub nonce_str: String,
    /// Pre-computed signature, sent verbatim when set.
    pub sign: Option<String>,
    pub sign_type: Option<SignType>,
    pub body: String,
    pub detail: Option<String>,
    pub attach: Option<String>,
    pub out_trade_no: String,
    /// ISO 4217 code; the gateway assumes CNY.
    pub fee_type: Option<String>,
    /// Amount in cents.
    pub total_fee: i64,
    pub spbill_create_ip: String,
    /// `yyyyMMddHHmmss`
    pub time_start: Option<String>,
    /// `yyyyMMddHHmmss`
    pub time_expire: Option<String>,
    pub goods_tag: Option<String>,
    pub notify_url: String,
    pub trade_type: Option<TradeType>,
    pub product_id: Option<String>,
    /// `no_credit` disables credit cards.
    pub limit_pay: Option<String>,
    pub openid: Option<String>,
    /// JSON, see [`H5Info`].
    pub scene_info: Option<String>,
}

/// Fields shared by the order variant constructors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDetails {
    pub out_trade_no: String,
    pub product_id: Option<String>,
    pub body: String,
    pub detail: String,
    pub client_ip: String,
    pub notify_url: String,
    pub total_fee: i64,
    pub attach: Option<String>,
}

/// H5 payment scene, reported as `{"h5_info": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum H5Info {
    #[serde(rename = "IOS")]
    Ios { app_name: String, bundle_id: String },
    #[serde(rename = "Android")]
    Android {
        app_name: String,
        package_name: String,
    },
    #[serde(rename = "Wap")]
    Wap { wap_url: String, wap_name: String },
}

#[derive(Serialize)]
struct SceneInfo<'a> {
    h5_info: &'a H5Info,
}

impl H5Info {
    /// Renders the `scene_info` JSON document.
    pub fn to_scene_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&SceneInfo { h5_info: self })
    }
}

impl UnifiedOrder {
    fn from_details(details: OrderDetails, trade_type: TradeType) -> Self {
        Self {
            body: details.body,
            detail: Some(details.detail),
            out_trade_no: details.out_trade_no,
            total_fee: details.total_fee,
            spbill_create_ip: details.client_ip,
            notify_url: details.notify_url,
            trade_type: Some(trade_type),
            product_id: details.product_id.filter(|s| !s.is_empty()),
            attach: details.attach.filter(|s| !s.is_empty()),
            ..Self::default()
        }
    }

    /// In-app payment.
    pub fn app(details: OrderDetails) -> Self {
        Self::from_details(details, TradeType::App)
    }

    /// Mobile web payment, optionally reporting the H5 scene.
    pub fn h5(details: OrderDetails, scene: Option<&H5Info>) -> Result<Self, serde_json::Error> {
        let mut order = Self::from_details(details, TradeType::Mweb);
        order.scene_info = scene.map(H5Info::to_scene_json).transpose()?;
        Ok(order)
    }

    /// Payment inside the messenger for the user `openid`.
    pub fn jsapi(details: OrderDetails, openid: impl Into<String>) -> Self {
        let mut order = Self::from_details(details, TradeType::Jsapi);
        order.openid = Some(openid.into());
        order
    }

    /// QR-code payment for `product_id`.
    pub fn native(details: OrderDetails) -> Self {
        Self::from_details(details, TradeType::Native)
    }

    /// Fills merchant identity, nonce and trade type where unset.
    pub fn with_defaults(mut self, app_id: &str, mch_id: &str, trade_type: TradeType) -> Self {
        if self.nonce_str.is_empty() {
            self.nonce_str = new_nonce();
        }
        if self.trade_type.is_none() {
            self.trade_type = Some(trade_type);
        }
        if self.appid.is_empty() {
            self.appid = app_id.to_string();
        }
        if self.mch_id.is_empty() {
            self.mch_id = mch_id.to_string();
        }
        self
    }

    /// Scheme the reply is expected to be signed with.
    pub fn effective_sign_type(&self) -> SignType {
        self.sign_type.unwrap_or_default()
    }

    /// Checks the fields the gateway always requires.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        let required = [
            ("body", &self.body),
            ("out_trade_no", &self.out_trade_no),
            ("spbill_create_ip", &self.spbill_create_ip),
            ("notify_url", &self.notify_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(OrderValidationError::MissingField(name));
            }
        }

        if self.total_fee <= 0 {
            return Err(OrderValidationError::NonPositiveFee(self.total_fee));
        }

        match self.trade_type {
            Some(TradeType::Jsapi) if self.openid.as_deref().unwrap_or("").is_empty() => {
                Err(OrderValidationError::MissingForTradeType {
                    trade_type: TradeType::Jsapi,
                    field: "openid",
                })
            }
            Some(TradeType::Native) if self.product_id.is_none() => {
                Err(OrderValidationError::MissingForTradeType {
                    trade_type: TradeType::Native,
                    field: "product_id",
                })
            }
            _ => Ok(()),
        }
    }
}

impl SignableFields for UnifiedOrder {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::root(),
            Field::required("appid", &self.appid),
            Field::required("mch_id", &self.mch_id),
            Field::optional("device_info", self.device_info.as_ref()),
            Field::required("nonce_str", &self.nonce_str),
            Field::signature(self.sign.as_deref()),
            Field::optional("sign_type", self.sign_type),
            Field::required("body", &self.body),
            Field::optional("detail", self.detail.as_ref()),
            Field::optional("attach", self.attach.as_ref()),
            Field::required("out_trade_no", &self.out_trade_no),
            Field::optional("fee_type", self.fee_type.as_ref()),
            Field::required("total_fee", self.total_fee),
            Field::required("spbill_create_ip", &self.spbill_create_ip),
            Field::optional("time_start", self.time_start.as_ref()),
            Field::optional("time_expire", self.time_expire.as_ref()),
            Field::optional("goods_tag", self.goods_tag.as_ref()),
            Field::required("notify_url", &self.notify_url),
            Field::optional("trade_type", self.trade_type),
            Field::optional("product_id", self.product_id.as_ref()),
            Field::optional("limit_pay", self.limit_pay.as_ref()),
            Field::optional("openid", self.openid.as_ref()),
            Field::optional("scene_info", self.scene_info.as_ref()),
        ]
    }

    fn sign_type(&self) -> Option<&str> {
        self.sign_type.map(|t| t.as_str())
    }
}
