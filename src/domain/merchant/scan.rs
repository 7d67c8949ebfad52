//! Replies to native scan callbacks.
//!
//! When a buyer scans a mode-one QR link the gateway calls the merchant
//! back; the merchant answers with a signed XML document carrying the
//! prepay id of the order it just placed.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::order::{FAIL, SUCCESS};
use crate::domain::signing::{new_nonce, sign_params, Params, SignType};

use super::Merchant;

/// Outcome the merchant reports back to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReply {
    pub return_code: String,
    pub return_msg: String,
    pub prepay_id: String,
    pub result_code: String,
    pub err_code_des: String,
}

impl ScanReply {
    /// The order was placed; hand the prepay id back.
    pub fn success(prepay_id: impl Into<String>) -> Self {
        Self {
            return_code: SUCCESS.to_string(),
            return_msg: String::new(),
            prepay_id: prepay_id.into(),
            result_code: SUCCESS.to_string(),
            err_code_des: String::new(),
        }
    }

    /// Business failure, shown to the buyer as `err_code_des`.
    pub fn failure(err_code_des: impl Into<String>) -> Self {
        Self {
            return_code: SUCCESS.to_string(),
            return_msg: String::new(),
            prepay_id: String::new(),
            result_code: FAIL.to_string(),
            err_code_des: err_code_des.into(),
        }
    }
}

/// A scan callback reply, ready to be signed and rendered.
pub struct ScanResponse {
    params: Params,
    app_key: SecretString,
}

impl ScanResponse {
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Signs with MD5 and renders the XML reply body.
    pub fn to_xml(&self) -> String {
        sign_params(self.params.clone(), self.app_key.expose_secret(), SignType::Md5)
            .to_xml_string()
    }
}

impl Merchant {
    pub fn scan_response(&self, reply: ScanReply) -> ScanResponse {
        self.scan_response_with(reply, &new_nonce())
    }

    /// Like [`Merchant::scan_response`] with a caller-supplied nonce.
    pub fn scan_response_with(&self, reply: ScanReply, nonce: &str) -> ScanResponse {
        let params = Params::new()
            .with("return_code", reply.return_code)
            .with("return_msg", reply.return_msg)
            .with("appid", self.app_id())
            .with("mch_id", self.mch_id())
            .with("nonce_str", nonce)
            .with("prepay_id", reply.prepay_id)
            .with("result_code", reply.result_code)
            .with("err_code_des", reply.err_code_des);

        ScanResponse {
            params,
            app_key: self.app_key().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signing::verify_params;

    const KEY: &str = "192006250b4c09247ec02edce69f6a2d";

    fn merchant() -> Merchant {
        Merchant::new(
            "wxd930ea5d5a258f4f",
            SecretString::new(KEY.to_string()),
            "10000100",
            None,
        )
    }

    #[test]
    fn success_reply_carries_prepay_id() {
        let response = merchant().scan_response_with(ScanReply::success("wx2014"), "abc");

        let params = response.params();
        assert_eq!(params.get("return_code"), Some("SUCCESS"));
        assert_eq!(params.get("result_code"), Some("SUCCESS"));
        assert_eq!(params.get("prepay_id"), Some("wx2014"));
        assert_eq!(params.get("appid"), Some("wxd930ea5d5a258f4f"));
        assert_eq!(params.get("nonce_str"), Some("abc"));
    }

    #[test]
    fn failure_reply_sets_result_code() {
        let response = merchant().scan_response(ScanReply::failure("sold out"));

        assert_eq!(response.params().get("result_code"), Some("FAIL"));
        assert_eq!(response.params().get("err_code_des"), Some("sold out"));
    }

    #[test]
    fn rendered_reply_is_signed_and_verifiable() {
        let xml = merchant()
            .scan_response_with(ScanReply::success("wx2014"), "abc")
            .to_xml();

        let parsed = Params::from_xml(xml.as_bytes()).unwrap();

        assert!(verify_params(&parsed, KEY, SignType::Md5).is_ok());
        assert!(xml.starts_with("<xml><appid>"));
        assert!(!xml.contains(KEY));
    }
}
