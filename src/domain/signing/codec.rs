//! Structured message codec.
//!
//! Outbound, a [`SignableFields`] value is flattened into a [`Params`],
//! signed and rendered as XML. Inbound, an XML reply is parsed and handed to
//! a [`FromParams`] table.

use super::errors::CodecError;
use super::fields::{FieldRole, FromParams, SignableFields};
use super::params::{Params, SIGN_FIELD};
use super::sign_type::SignType;
use super::signer::sign_params;

/// Parameters extracted from a structured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Every encoded field, in declaration order.
    pub params: Params,
    /// Signature supplied on the value itself, if any.
    pub signature: Option<String>,
}

/// Walks the field table of `value`.
///
/// Unset optional fields are skipped, as are the root marker, ignored fields
/// and fields with an empty tag. The signature field is never added; a
/// non-empty value is captured instead.
pub fn extract<T: SignableFields + ?Sized>(value: &T) -> Extracted {
    let mut extracted = Extracted::default();

    for field in value.fields() {
        if field.role == FieldRole::Signature {
            if let Some(sig) = field.value.filter(|s| !s.is_empty()) {
                extracted.signature = Some(sig);
            }
            continue;
        }
        if !field.is_encoded() {
            continue;
        }
        if let Some(v) = field.value {
            extracted.params.push(field.tag.into_owned(), v);
        }
    }

    extracted
}

/// Builds the signed parameter set for a request.
///
/// A signature already present on the value is used verbatim. Otherwise the
/// value is signed with the scheme it names in `sign_type` (MD5 when unset).
pub fn sign_request<T: SignableFields + ?Sized>(value: &T, key: &str) -> Result<Params, CodecError> {
    let Extracted { params, signature } = extract(value);

    match signature {
        Some(sig) => Ok(params.with(SIGN_FIELD, sig)),
        None => {
            let sign_type = SignType::parse_or_default(value.sign_type())?;
            Ok(sign_params(params, key, sign_type))
        }
    }
}

/// Signs a request and renders it in the XML wire format.
pub fn encode_request<T: SignableFields + ?Sized>(value: &T, key: &str) -> Result<String, CodecError> {
    Ok(sign_request(value, key)?.to_xml_string())
}

/// Parses an XML reply into a typed response.
pub fn decode_response<T: FromParams>(data: &[u8]) -> Result<T, CodecError> {
    let params = Params::from_xml(data)?;
    Ok(T::from_params(&params))
}
