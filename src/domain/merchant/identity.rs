//! Merchant credentials.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::signing::{
    self, CodecError, Params, SignType, SignableFields, SignatureError,
};

/// The caller's gateway credentials.
///
/// Immutable after construction; share it behind an `Arc`. The app key is
/// only ever used as key material and never rendered, not even by `Debug`.
#[derive(Clone)]
pub struct Merchant {
    app_id: String,
    app_key: SecretString,
    mch_id: String,
    app_secret: Option<SecretString>,
}

impl Merchant {
    pub fn new(
        app_id: impl Into<String>,
        app_key: SecretString,
        mch_id: impl Into<String>,
        app_secret: Option<SecretString>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_key,
            mch_id: mch_id.into(),
            app_secret,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn mch_id(&self) -> &str {
        &self.mch_id
    }

    pub(super) fn app_key(&self) -> &SecretString {
        &self.app_key
    }

    /// API password. Not used for signing.
    pub fn app_secret(&self) -> Option<&SecretString> {
        self.app_secret.as_ref()
    }

    /// True when app id, app key and merchant id are all set.
    pub fn is_valid(&self) -> bool {
        !self.app_id.is_empty()
            && !self.mch_id.is_empty()
            && !self.app_key.expose_secret().is_empty()
    }

    /// Signature of `params` under this merchant's key.
    pub fn signature_of(&self, params: &Params, sign_type: SignType) -> String {
        signing::sign(params, self.app_key.expose_secret(), sign_type)
    }

    /// Signs `params` and appends the `sign` parameter.
    pub fn sign(&self, params: Params, sign_type: SignType) -> Params {
        signing::sign_params(params, self.app_key.expose_secret(), sign_type)
    }

    /// Signs a structured request and renders it as XML.
    pub fn encode<T: SignableFields + ?Sized>(&self, value: &T) -> Result<String, CodecError> {
        signing::encode_request(value, self.app_key.expose_secret())
    }

    /// Checks `claimed` against the fields of a gateway reply.
    pub fn verify<T: SignableFields + ?Sized>(
        &self,
        value: &T,
        claimed: &str,
        sign_type: SignType,
    ) -> Result<(), SignatureError> {
        signing::verify_with(value, self.app_key.expose_secret(), claimed, sign_type)
    }
}

impl fmt::Debug for Merchant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merchant")
            .field("app_id", &self.app_id)
            .field("app_key", &"[REDACTED]")
            .field("mch_id", &self.mch_id)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
