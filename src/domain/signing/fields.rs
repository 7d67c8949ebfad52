//! Declarative field tables for structured gateway messages.
//!
//! A request or response type lists its wire fields once, in declaration
//! order, through [`SignableFields::fields`]. The codec walks that table to
//! build a [`Params`]; the verifier walks the same table to recompute a
//! response signature. Reading a response goes the other way through
//! [`FromParams`].

use std::borrow::Cow;
use std::fmt::Display;

use super::params::{Params, SIGN_FIELD, XML_ROOT};

/// Tag that marks a field as never encoded.
pub const IGNORE_TAG: &str = "-";

/// What a field contributes to a signed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Ordinary signed field.
    Normal,
    /// Carries the message signature; never part of the signing input.
    Signature,
    /// Names the document root; never encoded as a child.
    RootMarker,
    /// Never encoded.
    Ignore,
}

/// One entry of a field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub tag: Cow<'static, str>,
    pub value: Option<String>,
    pub role: FieldRole,
}

impl Field {
    /// A field that is always present.
    pub fn required(tag: impl Into<Cow<'static, str>>, value: impl Display) -> Self {
        Self {
            tag: tag.into(),
            value: Some(value.to_string()),
            role: FieldRole::Normal,
        }
    }

    /// A field that is skipped entirely when `None`.
    pub fn optional<T: Display>(tag: impl Into<Cow<'static, str>>, value: Option<T>) -> Self {
        Self {
            tag: tag.into(),
            value: value.map(|v| v.to_string()),
            role: FieldRole::Normal,
        }
    }

    /// The signature slot of a message.
    pub fn signature(value: Option<&str>) -> Self {
        Self {
            tag: Cow::Borrowed(SIGN_FIELD),
            value: value.map(str::to_owned),
            role: FieldRole::Signature,
        }
    }

    /// The document root marker.
    pub fn root() -> Self {
        Self {
            tag: Cow::Borrowed(XML_ROOT),
            value: None,
            role: FieldRole::RootMarker,
        }
    }

    /// A field kept on the type but never sent.
    pub fn ignored(tag: impl Into<Cow<'static, str>>, value: impl Display) -> Self {
        Self {
            tag: tag.into(),
            value: Some(value.to_string()),
            role: FieldRole::Ignore,
        }
    }

    /// Whether this field is encoded as a parameter at all.
    pub fn is_encoded(&self) -> bool {
        let tag = self.tag.as_ref();
        self.role == FieldRole::Normal && !tag.is_empty() && tag != XML_ROOT && tag != IGNORE_TAG
    }
}

/// A structured message that can be walked field by field.
pub trait SignableFields {
    /// Wire fields in declaration order.
    fn fields(&self) -> Vec<Field>;

    /// Wire name of the scheme this message asks to be signed with.
    fn sign_type(&self) -> Option<&str> {
        None
    }
}

/// A structured message that can be read back from a parameter set.
///
/// Unknown parameters are ignored and missing ones leave the field at its
/// default.
pub trait FromParams: Sized {
    fn from_params(params: &Params) -> Self;
}

/// Parameters with a non-empty value, used by response tables where the
/// gateway omits empty elements from its signing input.
pub fn non_empty(params: &Params, name: &str) -> Option<String> {
    params
        .get(name)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Value of a parameter, or an empty string when missing.
pub fn or_empty(params: &Params, name: &str) -> String {
    params.get(name).unwrap_or_default().to_owned()
}

impl SignableFields for Params {
    fn fields(&self) -> Vec<Field> {
        self.iter()
            .map(|p| {
                if p.name == SIGN_FIELD {
                    Field::signature(Some(&p.value))
                } else {
                    Field::required(p.name.clone(), &p.value)
                }
            })
            .collect()
    }

    fn sign_type(&self) -> Option<&str> {
        self.get("sign_type")
    }
}
