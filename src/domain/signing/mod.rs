//! Canonical parameter model and the signing protocol.
//!
//! Everything here is pure and synchronous. Gateway I/O lives behind
//! [`crate::ports::GatewayTransport`].

mod codec;
mod errors;
mod fields;
mod nonce;
mod params;
mod sign_type;
mod signer;
mod verifier;

pub use codec::{decode_response, encode_request, extract, sign_request, Extracted};
pub use errors::{CodecError, SignatureError};
pub use fields::{non_empty, or_empty, Field, FieldRole, FromParams, SignableFields, IGNORE_TAG};
pub use nonce::{new_nonce, new_timestamp, timestamp_at, CHINA_TIMEZONE_OFFSET_SECS};
pub use params::{Param, Params, SIGN_FIELD, XML_ROOT};
pub use sign_type::SignType;
pub use signer::{sign, sign_params, signing_input};
pub use verifier::{verify, verify_params, verify_with};
