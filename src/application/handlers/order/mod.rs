//! Order handlers.
//!
//! ## Commands
//! - Placing unified orders
//! - Closing unpaid orders
//!
//! ## Queries
//! - Querying an order by transaction id or merchant order id
//!
//! Every handler signs its request with the merchant key, posts it through
//! the gateway transport and verifies the reply signature whenever the
//! gateway reports `return_code == SUCCESS`. Failed replies are returned
//! as-is and never verified.

mod close_order;
mod errors;
mod exchange;
mod place_order;
mod query_order;

// Commands
pub use close_order::{CloseOrderCommand, CloseOrderHandler};
pub use place_order::{PlaceOrderCommand, PlaceOrderHandler};

// Queries
pub use query_order::{QueryOrderHandler, QueryOrderQuery, QueryOrderResult};

pub use errors::OrderError;
