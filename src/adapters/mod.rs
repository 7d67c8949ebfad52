//! Adapters - Implementations of port interfaces.
//!
//! - `http` - Gateway transports (reqwest, in-memory mock)

pub mod http;

pub use http::{MockGatewayTransport, ReqwestTransport};
