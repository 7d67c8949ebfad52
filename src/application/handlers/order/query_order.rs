//! QueryOrderHandler - Query handler for order state.

use std::sync::Arc;

use crate::domain::merchant::Merchant;
use crate::domain::order::{OrderLookup, OrderQueryRequest, PayResult};
use crate::domain::signing::{decode_response, new_nonce, SignType};
use crate::ports::{GatewayEndpoints, GatewayTransport};

use super::exchange::{check_reply, post_signed};
use super::OrderError;

/// Query for an order by gateway or merchant id.
#[derive(Debug, Clone)]
pub struct QueryOrderQuery {
    pub lookup: OrderLookup,
}

impl QueryOrderQuery {
    pub fn by_transaction_id(id: impl Into<String>) -> Self {
        Self {
            lookup: OrderLookup::TransactionId(id.into()),
        }
    }

    pub fn by_out_trade_no(id: impl Into<String>) -> Self {
        Self {
            lookup: OrderLookup::OutTradeNo(id.into()),
        }
    }
}

/// Parsed pay result together with the reply bytes it was read from.
#[derive(Debug, Clone)]
pub struct QueryOrderResult {
    pub pay_result: PayResult,
    pub raw: Vec<u8>,
}

pub struct QueryOrderHandler {
    merchant: Arc<Merchant>,
    transport: Arc<dyn GatewayTransport>,
    endpoints: GatewayEndpoints,
}

impl QueryOrderHandler {
    pub fn new(
        merchant: Arc<Merchant>,
        transport: Arc<dyn GatewayTransport>,
        endpoints: GatewayEndpoints,
    ) -> Self {
        Self {
            merchant,
            transport,
            endpoints,
        }
    }

    pub async fn handle(&self, query: QueryOrderQuery) -> Result<QueryOrderResult, OrderError> {
        let request = OrderQueryRequest {
            appid: self.merchant.app_id().to_string(),
            mch_id: self.merchant.mch_id().to_string(),
            nonce_str: new_nonce(),
            lookup: query.lookup,
        };

        tracing::debug!(lookup = ?request.lookup, "Querying order");

        let raw = post_signed(
            &self.merchant,
            self.transport.as_ref(),
            &self.endpoints.query_order,
            &request,
        )
        .await?;

        let pay_result: PayResult = decode_response(&raw)?;
        check_reply(&self.merchant, &pay_result, SignType::Md5)?;

        Ok(QueryOrderResult { pay_result, raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockGatewayTransport;
    use crate::domain::order::TradeState;
    use crate::domain::signing::{sign_params, Params};
    use secrecy::SecretString;

    const KEY: &str = "192006250b4c09247ec02edce69f6a2d";

    fn handler(transport: &MockGatewayTransport) -> QueryOrderHandler {
        QueryOrderHandler::new(
            Arc::new(Merchant::new(
                "wxd930ea5d5a258f4f",
                SecretString::new(KEY.to_string()),
                "10000100",
                None,
            )),
            Arc::new(transport.clone()),
            GatewayEndpoints::from_base("https://gateway.test"),
        )
    }

    fn paid_reply() -> String {
        let reply = Params::new()
            .with("return_code", "SUCCESS")
            .with("result_code", "SUCCESS")
            .with("trade_state", "SUCCESS")
            .with("transaction_id", "1009660380201506130728806387")
            .with("out_trade_no", "20150806125346")
            .with("total_fee", "101");
        sign_params(reply, KEY, SignType::Md5).to_xml_string()
    }

    #[tokio::test]
    async fn query_by_transaction_id_sends_transaction_id() {
        let transport = MockGatewayTransport::new();
        transport.push_reply(paid_reply());

        let result = handler(&transport)
            .handle(QueryOrderQuery::by_transaction_id("1009660380201506130728806387"))
            .await
            .unwrap();

        assert_eq!(result.pay_result.trade_state(), Some(TradeState::Success));

        let call = transport.last_call().unwrap();
        assert_eq!(call.url, "https://gateway.test/pay/orderquery");
        let sent = Params::from_xml(&call.body).unwrap();
        assert_eq!(sent.get("transaction_id"), Some("1009660380201506130728806387"));
        assert!(!sent.contains("out_trade_no"));
    }

    #[tokio::test]
    async fn query_by_out_trade_no_returns_raw_reply() {
        let transport = MockGatewayTransport::new();
        let reply = paid_reply();
        transport.push_reply(reply.clone());

        let result = handler(&transport)
            .handle(QueryOrderQuery::by_out_trade_no("20150806125346"))
            .await
            .unwrap();

        assert_eq!(result.raw, reply.into_bytes());
        assert_eq!(result.pay_result.total_fee_cents(), Some(101));

        let sent = Params::from_xml(&transport.last_call().unwrap().body).unwrap();
        assert_eq!(sent.get("out_trade_no"), Some("20150806125346"));
    }

    #[tokio::test]
    async fn tampered_pay_result_is_rejected() {
        let transport = MockGatewayTransport::new();
        transport.push_reply(paid_reply().replace("<total_fee>101", "<total_fee>1"));

        let result = handler(&transport)
            .handle(QueryOrderQuery::by_out_trade_no("20150806125346"))
            .await;

        assert!(matches!(result, Err(OrderError::Signature(_))));
    }
}
