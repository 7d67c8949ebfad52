//! PlaceOrderHandler - Command handler for unified orders.

use std::sync::Arc;

use crate::domain::merchant::Merchant;
use crate::domain::order::{PlaceOrderResponse, TradeType, UnifiedOrder};
use crate::domain::signing::decode_response;
use crate::ports::{GatewayEndpoints, GatewayTransport};

use super::exchange::{check_reply, post_signed};
use super::OrderError;

/// Command to place a unified order.
#[derive(Debug, Clone)]
pub struct PlaceOrderCommand {
    pub order: UnifiedOrder,
}

/// Handler for placing unified orders.
///
/// Fills `appid`, `mch_id`, `nonce_str` and `trade_type` when the order
/// leaves them empty, then validates, signs and posts it.
pub struct PlaceOrderHandler {
    merchant: Arc<Merchant>,
    transport: Arc<dyn GatewayTransport>,
    endpoints: GatewayEndpoints,
    default_trade_type: TradeType,
}

impl PlaceOrderHandler {
    pub fn new(
        merchant: Arc<Merchant>,
        transport: Arc<dyn GatewayTransport>,
        endpoints: GatewayEndpoints,
    ) -> Self {
        Self {
            merchant,
            transport,
            endpoints,
            default_trade_type: TradeType::default(),
        }
    }

    /// Overrides the trade type used when an order leaves it unset.
    pub fn with_default_trade_type(mut self, trade_type: TradeType) -> Self {
        self.default_trade_type = trade_type;
        self
    }

    pub async fn handle(&self, cmd: PlaceOrderCommand) -> Result<PlaceOrderResponse, OrderError> {
        // 1. Fill merchant defaults and validate
        let order = cmd.order.with_defaults(
            self.merchant.app_id(),
            self.merchant.mch_id(),
            self.default_trade_type,
        );
        order.validate()?;

        tracing::debug!(
            out_trade_no = %order.out_trade_no,
            trade_type = ?order.trade_type,
            "Placing unified order"
        );

        // 2. Sign and post
        let reply = post_signed(
            &self.merchant,
            self.transport.as_ref(),
            &self.endpoints.place_order,
            &order,
        )
        .await?;

        // 3. Decode and verify when the gateway reports success
        let response: PlaceOrderResponse = decode_response(&reply)?;
        check_reply(&self.merchant, &response, order.effective_sign_type())?;

        Ok(response)
    }
}
