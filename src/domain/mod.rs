//! Domain layer containing the signing protocol and gateway schemas.
//!
//! # Module Organization
//!
//! - `signing` - Canonical parameters, signer, verifier and XML codec
//! - `merchant` - Merchant identity, QR links and scan replies
//! - `order` - Order requests and typed gateway replies

pub mod merchant;
pub mod order;
pub mod signing;
