//! HTTP transport adapters for the gateway port.
//!
//! - `ReqwestTransport` - Production transport over HTTPS
//! - `MockGatewayTransport` - Scripted in-memory transport for tests

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::{MockGatewayTransport, RecordedPost};
pub use reqwest_transport::ReqwestTransport;
