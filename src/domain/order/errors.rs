//! Order validation errors.

use thiserror::Error;

use super::TradeType;

/// Reasons a unified order is rejected before it is signed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Total fee must be positive, got {0}")]
    NonPositiveFee(i64),

    #[error("Trade type {trade_type} requires {field}")]
    MissingForTradeType {
        trade_type: TradeType,
        field: &'static str,
    },
}
