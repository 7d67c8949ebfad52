//! CloseOrderHandler - Command handler for closing unpaid orders.

use std::sync::Arc;

use crate::domain::merchant::Merchant;
use crate::domain::order::{CloseOrderRequest, CloseOrderResponse};
use crate::domain::signing::{decode_response, new_nonce, SignType};
use crate::ports::{GatewayEndpoints, GatewayTransport};

use super::exchange::{check_reply, post_signed};
use super::OrderError;

/// Command to close an order by its merchant order id.
#[derive(Debug, Clone)]
pub struct CloseOrderCommand {
    pub out_trade_no: String,
}

pub struct CloseOrderHandler {
    merchant: Arc<Merchant>,
    transport: Arc<dyn GatewayTransport>,
    endpoints: GatewayEndpoints,
}

impl CloseOrderHandler {
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

    pub async fn handle(&self, cmd: CloseOrderCommand) -> Result<CloseOrderResponse, OrderError> {
        let request = CloseOrderRequest {
            appid: self.merchant.app_id().to_string(),
            mch_id: self.merchant.mch_id().to_string(),
            out_trade_no: cmd.out_trade_no,
            nonce_str: new_nonce(),
        };

        tracing::debug!(out_trade_no = %request.out_trade_no, "Closing order");

        let reply = post_signed(
            &self.merchant,
            self.transport.as_ref(),
            &self.endpoints.close_order,
            &request,
        )
        .await?;

        let response: CloseOrderResponse = decode_response(&reply)?;
        check_reply(&self.merchant, &response, SignType::Md5)?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockGatewayTransport;
    use crate::domain::order::GatewayReply;
    use crate::domain::signing::{sign_params, Params};
    use secrecy::SecretString;

    const KEY: &str = "192006250b4c09247ec02edce69f6a2d";

    fn handler(transport: &MockGatewayTransport) -> CloseOrderHandler {
        CloseOrderHandler::new(
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

    #[tokio::test]
    async fn sends_signed_close_request() {
        let transport = MockGatewayTransport::new();
        let reply = Params::new()
            .with("return_code", "SUCCESS")
            .with("result_code", "SUCCESS");
        transport.push_reply(sign_params(reply, KEY, SignType::Md5).to_xml_string());

        let response = handler(&transport)
            .handle(CloseOrderCommand {
                out_trade_no: "1415757673".into(),
            })
            .await
            .unwrap();

        assert!(response.is_business_success());

        let call = transport.last_call().unwrap();
        assert_eq!(call.url, "https://gateway.test/pay/closeorder");
        let sent = Params::from_xml(&call.body).unwrap();
        assert_eq!(sent.get("out_trade_no"), Some("1415757673"));
        assert_eq!(sent.len(), 5);
    }

    #[tokio::test]
    async fn accepts_signed_reply_with_result_msg() {
        let transport = MockGatewayTransport::new();
        let reply = Params::new()
            .with("return_code", "SUCCESS")
            .with("return_msg", "OK")
            .with("appid", "wxd930ea5d5a258f4f")
            .with("mch_id", "10000100")
            .with("nonce_str", "BFK89FC6rxKCOjLX")
            .with("result_code", "SUCCESS")
            .with("result_msg", "OK");
        transport.push_reply(sign_params(reply, KEY, SignType::Md5).to_xml_string());

        let response = handler(&transport)
            .handle(CloseOrderCommand {
                out_trade_no: "1415757673".into(),
            })
            .await
            .unwrap();

        assert!(response.is_business_success());
        assert_eq!(response.result_msg.as_deref(), Some("OK"));
    }

    #[tokio::test]
    async fn business_failure_is_returned() {
        let transport = MockGatewayTransport::new();
        let reply = Params::new()
            .with("return_code", "SUCCESS")
            .with("result_code", "FAIL")
            .with("err_code", "ORDERPAID")
            .with("err_code_des", "order already paid");
        transport.push_reply(sign_params(reply, KEY, SignType::Md5).to_xml_string());

        let response = handler(&transport)
            .handle(CloseOrderCommand {
                out_trade_no: "1415757673".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.error_code(), Some("ORDERPAID"));
    }
}
