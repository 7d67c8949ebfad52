//! Native payment QR-code links (mode one).

use crate::domain::signing::{new_nonce, new_timestamp, Params, SignType, SIGN_FIELD};

use super::Merchant;

pub const QR_LINK_PREFIX: &str = "weixin://wxpay/bizpayurl?";

impl Merchant {
    /// Builds a signed QR-code link for `product_id`.
    pub fn qr_link(&self, product_id: &str) -> String {
        self.qr_link_with(product_id, &new_nonce(), &new_timestamp())
    }

    /// Builds a QR-code link with a caller-supplied nonce and timestamp.
    pub fn qr_link_with(&self, product_id: &str, nonce: &str, timestamp: &str) -> String {
        let params = Params::new()
            .with("appid", self.app_id())
            .with("mch_id", self.mch_id())
            .with("nonce_str", nonce)
            .with("product_id", product_id)
            .with("time_stamp", timestamp);
        let signature = self.signature_of(&params, SignType::Md5);

        format!(
            "{}{}",
            QR_LINK_PREFIX,
            params.with(SIGN_FIELD, signature).to_query_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

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
    fn link_lists_sorted_fields_and_signature() {
        let link = merchant().qr_link_with("p-1", "abc", "1700028800");

        let unsigned = Params::new()
            .with("appid", "wxd930ea5d5a258f4f")
            .with("mch_id", "10000100")
            .with("nonce_str", "abc")
            .with("product_id", "p-1")
            .with("time_stamp", "1700028800");
        let expected_sign = crate::domain::signing::sign(&unsigned, KEY, SignType::Md5);

        assert_eq!(
            link,
            format!(
                "weixin://wxpay/bizpayurl?appid=wxd930ea5d5a258f4f&mch_id=10000100&nonce_str=abc&product_id=p-1&sign={}&time_stamp=1700028800",
                expected_sign
            )
        );
    }

    #[test]
    fn link_never_contains_key() {
        let link = merchant().qr_link("p-1");

        assert!(link.starts_with(QR_LINK_PREFIX));
        assert!(!link.contains(KEY));
        assert!(!link.contains("key="));
    }

    #[test]
    fn links_use_fresh_nonces() {
        let merchant = merchant();
        assert_ne!(merchant.qr_link("p-1"), merchant.qr_link("p-1"));
    }
}
