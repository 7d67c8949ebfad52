//! Gateway transport backed by `reqwest`.

use async_trait::async_trait;

use crate::ports::{GatewayTransport, TransportError};

const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// POSTs XML bodies over HTTPS.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client, e.g. one with a client certificate.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl GatewayTransport for ReqwestTransport {
    async fn post_bytes(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        tracing::debug!(url = %url, bytes = body.len(), "Posting to gateway");

        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Gateway request failed");
                TransportError::network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                "Gateway returned non-success status"
            );
            return Err(TransportError::http_status(
                status.as_u16(),
                format!("Gateway error: {}", error_text),
            ));
        }

        let bytes = response.bytes().await.map_err(|e| {
            TransportError::invalid_response(format!("Failed to read gateway reply: {}", e))
        })?;

        Ok(bytes.to_vec())
    }
}
