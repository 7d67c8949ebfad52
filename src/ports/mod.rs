//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GatewayTransport` - Posts signed XML documents to the gateway

mod gateway_transport;

pub use gateway_transport::{
    GatewayEndpoints, GatewayTransport, TransportError, TransportErrorCode,
    CLOSE_ORDER_PATH, ORDER_QUERY_PATH, UNIFIED_ORDER_PATH,
};
