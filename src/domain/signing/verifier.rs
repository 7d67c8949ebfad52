//! Signature verification for gateway replies.
//!
//! The signature is recomputed over the same field table the codec uses and
//! compared with the claimed value in constant time. Casing matters: the
//! gateway and the signer both emit uppercase hex.

use subtle::ConstantTimeEq;

use super::codec::extract;
use super::errors::SignatureError;
use super::fields::SignableFields;
use super::params::{Params, SIGN_FIELD};
use super::sign_type::SignType;
use super::signer::sign;

/// Verifies an MD5 signature over the signable fields of `value`.
///
/// # Errors
///
/// Returns `SignatureError::Mismatch` unless `claimed` equals the recomputed
/// signature exactly.
pub fn verify<T: SignableFields + ?Sized>(
    value: &T,
    key: &str,
    claimed: &str,
) -> Result<(), SignatureError> {
    verify_with(value, key, claimed, SignType::Md5)
}

/// Like [`verify`], for replies signed with a specific scheme.
pub fn verify_with<T: SignableFields + ?Sized>(
    value: &T,
    key: &str,
    claimed: &str,
    sign_type: SignType,
) -> Result<(), SignatureError> {
    let params = extract(value).params;
    let computed = sign(&params, key, sign_type);

    if !constant_time_compare(computed.as_bytes(), claimed.as_bytes()) {
        return Err(SignatureError::mismatch(claimed, computed));
    }

    Ok(())
}

/// Verifies a raw parsed document against its own `sign` parameter.
///
/// Empty elements are left out of the signing input, as with typed replies.
pub fn verify_params(params: &Params, key: &str, sign_type: SignType) -> Result<(), SignatureError> {
    let claimed = params
        .get(SIGN_FIELD)
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::Missing)?;

    let present: Params = params
        .iter()
        .filter(|p| !p.value.is_empty())
        .cloned()
        .collect();

    verify_with(&present, key, claimed, sign_type)
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signing::fields::Field;
    use crate::domain::signing::signer::sign_params;

    const KEY: &str = "192006250b4c09247ec02edce69f6a2d";

    fn sample() -> Params {
        Params::new()
            .with("appid", "wxd930ea5d5a258f4f")
            .with("mch_id", "10000100")
            .with("device_info", "1000")
            .with("body", "test")
            .with("nonce_str", "ibuaiVcKdpRxkhJA")
    }

    struct Reply {
        return_code: String,
        prepay_id: Option<String>,
        sign: String,
    }

    impl SignableFields for Reply {
        fn fields(&self) -> Vec<Field> {
            vec![
                Field::required("return_code", &self.return_code),
                Field::optional("prepay_id", self.prepay_id.as_ref()),
                Field::signature(Some(&self.sign)),
            ]
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Structured Values
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_accepts_matching_signature() {
        let params = Params::new()
            .with("return_code", "SUCCESS")
            .with("prepay_id", "wx201410272009395522657a690389285100");
        let signature = sign(&params, KEY, SignType::Md5);
        let reply = Reply {
            return_code: "SUCCESS".into(),
            prepay_id: Some("wx201410272009395522657a690389285100".into()),
            sign: signature.clone(),
        };

        assert_eq!(verify(&reply, KEY, &signature), Ok(()));
    }

    #[test]
    fn verify_skips_absent_optional_fields() {
        let params = Params::new().with("return_code", "SUCCESS");
        let signature = sign(&params, KEY, SignType::Md5);
        let reply = Reply {
            return_code: "SUCCESS".into(),
            prepay_id: None,
            sign: signature.clone(),
        };

        assert!(verify(&reply, KEY, &signature).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_field() {
        let params = Params::new()
            .with("return_code", "SUCCESS")
            .with("prepay_id", "original");
        let signature = sign(&params, KEY, SignType::Md5);
        let reply = Reply {
            return_code: "SUCCESS".into(),
            prepay_id: Some("tampered".into()),
            sign: signature.clone(),
        };

        let result = verify(&reply, KEY, &signature);

        assert!(matches!(result, Err(SignatureError::Mismatch { .. })));
    }

    #[test]
    fn verify_is_case_sensitive() {
        let params = sample();
        let lower = sign(&params, KEY, SignType::Md5).to_lowercase();

        assert!(verify(&params, KEY, &lower).is_err());
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let params = sample();
        let signature = sign(&params, "another-key", SignType::Md5);

        assert!(verify(&params, KEY, &signature).is_err());
    }

    #[test]
    fn verify_with_hmac_sha256() {
        let params = sample();
        let signature = sign(&params, KEY, SignType::HmacSha256);

        assert!(verify_with(&params, KEY, &signature, SignType::HmacSha256).is_ok());
        assert!(verify(&params, KEY, &signature).is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Raw Documents
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_params_uses_embedded_signature() {
        let signed = sign_params(sample(), KEY, SignType::Md5);
        assert!(verify_params(&signed, KEY, SignType::Md5).is_ok());
    }

    #[test]
    fn verify_params_after_xml_round_trip() {
        let signed = sign_params(sample(), KEY, SignType::HmacSha256);
        let parsed = Params::from_xml(signed.to_xml_string().as_bytes()).unwrap();

        assert!(verify_params(&parsed, KEY, SignType::HmacSha256).is_ok());
    }

    #[test]
    fn verify_params_skips_empty_elements() {
        let signed = sign_params(sample(), KEY, SignType::Md5);
        let xml = signed
            .to_xml_string()
            .replace("</xml>", "<code_url></code_url></xml>");
        let parsed = Params::from_xml(xml.as_bytes()).unwrap();

        assert_eq!(parsed.get("code_url"), Some(""));
        assert!(verify_params(&parsed, KEY, SignType::Md5).is_ok());
    }

    #[test]
    fn verify_params_requires_signature() {
        assert_eq!(
            verify_params(&sample(), KEY, SignType::Md5),
            Err(SignatureError::Missing)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        assert!(constant_time_compare(b"ABCDEF", b"ABCDEF"));
    }

    #[test]
    fn constant_time_compare_different_values() {
        assert!(!constant_time_compare(b"ABCDEF", b"ABCDEG"));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(b"ABC", b"ABCD"));
    }
}
