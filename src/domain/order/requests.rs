//! Close and query requests.

use crate::domain::signing::{Field, SignableFields};

/// Closes an unpaid order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOrderRequest {
    pub appid: String,
    pub mch_id: String,
    pub out_trade_no: String,
    pub nonce_str: String,
}

impl SignableFields for CloseOrderRequest {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::root(),
            Field::required("appid", &self.appid),
            Field::required("mch_id", &self.mch_id),
            Field::required("out_trade_no", &self.out_trade_no),
            Field::required("nonce_str", &self.nonce_str),
        ]
    }
}

/// Which identifier an order query uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderLookup {
    /// Gateway-assigned `transaction_id`.
    TransactionId(String),
    /// Merchant-assigned `out_trade_no`.
    OutTradeNo(String),
}

impl OrderLookup {
    fn as_field(&self) -> Field {
        match self {
            OrderLookup::TransactionId(id) => Field::required("transaction_id", id),
            OrderLookup::OutTradeNo(id) => Field::required("out_trade_no", id),
        }
    }
}

/// Queries the state of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQueryRequest {
    pub appid: String,
    pub mch_id: String,
    pub nonce_str: String,
    pub lookup: OrderLookup,
}

impl SignableFields for OrderQueryRequest {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::root(),
            Field::required("appid", &self.appid),
            Field::required("mch_id", &self.mch_id),
            Field::required("nonce_str", &self.nonce_str),
            self.lookup.as_field(),
        ]
    }
}
