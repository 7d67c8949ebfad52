//! Request/reply exchange shared by the order handlers.

use crate::domain::merchant::Merchant;
use crate::domain::order::GatewayReply;
use crate::domain::signing::{SignType, SignableFields, SignatureError};
use crate::ports::GatewayTransport;

use super::OrderError;

/// Signs `request`, posts it to `url` and returns the raw reply.
pub(super) async fn post_signed<T: SignableFields + ?Sized>(
    merchant: &Merchant,
    transport: &dyn GatewayTransport,
    url: &str,
    request: &T,
) -> Result<Vec<u8>, OrderError> {
    if !merchant.is_valid() {
        return Err(OrderError::InvalidMerchant);
    }

    let body = merchant.encode(request)?;
    let reply = transport.post_bytes(url, body.into_bytes()).await?;
    Ok(reply)
}

/// Verifies a reply that reports success. Failed replies are left alone.
pub(super) fn check_reply<R: GatewayReply + SignableFields>(
    merchant: &Merchant,
    reply: &R,
    sign_type: SignType,
) -> Result<(), OrderError> {
    if !reply.is_success() {
        tracing::debug!(
            return_code = %reply.return_code(),
            return_msg = ?reply.return_msg(),
            "Gateway reported failure"
        );
        return Ok(());
    }

    let claimed = reply.sign().ok_or(SignatureError::Missing)?;
    merchant.verify(reply, claimed, sign_type).map_err(|e| {
        tracing::warn!(error = %e, "Gateway reply failed signature verification");
        OrderError::from(e)
    })
}
