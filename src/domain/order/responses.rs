//! Typed gateway replies.

use super::TradeState;

gateway_reply! {
    /// Reply to `/pay/unifiedorder`.
    pub struct PlaceOrderResponse {
        device_info => "device_info",
        trade_type => "trade_type",
        /// Valid for two hours.
        prepay_id => "prepay_id",
        /// NATIVE orders only.
        code_url => "code_url",
        /// MWEB orders only.
        mweb_url => "mweb_url",
    }
}

gateway_reply! {
    /// Reply to `/pay/closeorder`.
    pub struct CloseOrderResponse {
        result_msg => "result_msg",
    }
}

gateway_reply! {
    /// Reply to `/pay/orderquery`.
    pub struct PayResult {
        device_info => "device_info",
        openid => "openid",
        is_subscribe => "is_subscribe",
        trade_type => "trade_type",
        trade_state => "trade_state",
        bank_type => "bank_type",
        total_fee => "total_fee",
        settlement_total_fee => "settlement_total_fee",
        fee_type => "fee_type",
        cash_fee => "cash_fee",
        cash_fee_type => "cash_fee_type",
        coupon_fee => "coupon_fee",
        coupon_count => "coupon_count",
        transaction_id => "transaction_id",
        out_trade_no => "out_trade_no",
        attach => "attach",
        /// `yyyyMMddHHmmss`
        time_end => "time_end",
        trade_state_desc => "trade_state_desc",
    }
    dynamic coupons prefix "coupon_";
}

impl PayResult {
    pub fn trade_state(&self) -> Option<TradeState> {
        self.trade_state.as_deref().and_then(TradeState::parse)
    }

    /// Order amount in cents.
    pub fn total_fee_cents(&self) -> Option<i64> {
        self.total_fee.as_deref().and_then(|s| s.parse().ok())
    }
}
