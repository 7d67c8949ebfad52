//! Order schemas exchanged with the gateway.
//!
//! # Module Structure
//!
//! - `reply` - Status tokens and the common reply accessors
//! - `trade_type` - Trade types and trade states
//! - `unified_order` - Unified order request and its variants
//! - `requests` - Close and query requests
//! - `responses` - Typed gateway replies
//! - `errors` - Order validation errors
//! - `macros` - Field-table macro for replies

mod errors;
#[macro_use]
mod macros;
mod reply;
mod requests;
mod responses;
mod trade_type;
mod unified_order;

pub use errors::OrderValidationError;
pub use reply::{GatewayReply, FAIL, SUCCESS};
pub use requests::{CloseOrderRequest, OrderLookup, OrderQueryRequest};
pub use responses::{CloseOrderResponse, PayResult, PlaceOrderResponse};
pub use trade_type::{TradeState, TradeType};
pub use unified_order::{H5Info, OrderDetails, UnifiedOrder};
