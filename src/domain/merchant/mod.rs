//! Merchant identity and merchant-level signing helpers.
//!
//! # Module Structure
//!
//! - `identity` - Merchant credentials and signing entry points
//! - `qr_link` - Native payment QR-code links
//! - `scan` - Replies to native scan callbacks

mod identity;
mod qr_link;
mod scan;

pub use identity::Merchant;
pub use qr_link::QR_LINK_PREFIX;
pub use scan::{ScanReply, ScanResponse};
