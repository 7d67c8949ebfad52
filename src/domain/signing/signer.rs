//! Request signing.
//!
//! The signing input is the sorted query form of every parameter except
//! `sign`, followed by `&key=<secret>`. The digest is rendered as uppercase
//! hex for both schemes, and verification compares against the same casing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::params::{Params, SIGN_FIELD};
use super::sign_type::SignType;

type HmacSha256 = Hmac<Sha256>;

/// Builds the exact string that gets hashed. Never transmitted.
pub fn signing_input(params: &Params, key: &str) -> String {
    format!("{}&key={}", params.without(SIGN_FIELD).to_query_string(), key)
}

/// Computes the signature of `params` with the merchant key.
pub fn sign(params: &Params, key: &str, sign_type: SignType) -> String {
    let input = signing_input(params, key);

    match sign_type {
        SignType::Md5 => hex::encode_upper(md5::compute(input.as_bytes()).0),
        SignType::HmacSha256 => {
            let mut mac =
                HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts any key");
            mac.update(input.as_bytes());
            hex::encode_upper(mac.finalize().into_bytes())
        }
    }
}

/// Signs `params` and appends the result as the `sign` parameter.
///
/// Any `sign` parameter already present is replaced.
pub fn sign_params(params: Params, key: &str, sign_type: SignType) -> Params {
    let signature = sign(&params, key, sign_type);
    params.without(SIGN_FIELD).with(SIGN_FIELD, signature)
}
