//! Field-table macro for gateway replies.
//!
//! Every reply carries the same envelope (`return_code`, `return_msg`,
//! `appid`, `mch_id`, `nonce_str`, `sign`, `result_code`, `err_code`,
//! `err_code_des`) plus its own fields. `gateway_reply!` declares the struct
//! and generates its `FromParams`, `SignableFields` and `GatewayReply`
//! implementations from one list of `field => "tag"` pairs.
//!
//! Reply fields are `Option<String>`: empty or missing elements read as
//! `None` and are left out of the signing input, matching how the gateway
//! signs its own replies.
//!
//! An optional `dynamic field prefix "p";` clause collects every element
//! whose name starts with `p` and is not a declared field, for indexed
//! elements such as `coupon_fee_0`.

macro_rules! gateway_reply {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident => $tag:literal, )*
        }
        $( dynamic $dyn_field:ident prefix $prefix:literal; )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            pub return_code: String,
            pub return_msg: Option<String>,
            pub appid: Option<String>,
            pub mch_id: Option<String>,
            pub nonce_str: Option<String>,
            pub sign: Option<String>,
            pub result_code: Option<String>,
            pub err_code: Option<String>,
            pub err_code_des: Option<String>,
            $( $(#[$fmeta])* pub $field: Option<String>, )*
            $( pub $dyn_field: $crate::domain::signing::Params, )?
        }

        impl $name {
            #[allow(dead_code)]
            const DECLARED_TAGS: &'static [&'static str] = &[
                "return_code", "return_msg", "appid", "mch_id", "nonce_str", "sign",
                "result_code", "err_code", "err_code_des", $( $tag, )*
            ];
        }

        impl $crate::domain::signing::FromParams for $name {
            fn from_params(params: &$crate::domain::signing::Params) -> Self {
                use $crate::domain::signing::{non_empty, or_empty};
                Self {
                    return_code: or_empty(params, "return_code"),
                    return_msg: non_empty(params, "return_msg"),
                    appid: non_empty(params, "appid"),
                    mch_id: non_empty(params, "mch_id"),
                    nonce_str: non_empty(params, "nonce_str"),
                    sign: non_empty(params, "sign"),
                    result_code: non_empty(params, "result_code"),
                    err_code: non_empty(params, "err_code"),
                    err_code_des: non_empty(params, "err_code_des"),
                    $( $field: non_empty(params, $tag), )*
                    $( $dyn_field: params
                        .iter()
                        .filter(|p| p.name.starts_with($prefix) && !p.value.is_empty())
                        .filter(|p| !Self::DECLARED_TAGS.contains(&p.name.as_str()))
                        .cloned()
                        .collect(), )?
                }
            }
        }

        impl $crate::domain::signing::SignableFields for $name {
            fn fields(&self) -> Vec<$crate::domain::signing::Field> {
                use $crate::domain::signing::Field;
                #[allow(unused_mut)]
                let mut fields = vec![
                    Field::root(),
                    Field::optional(
                        "return_code",
                        Some(&self.return_code).filter(|s| !s.is_empty()),
                    ),
                    Field::optional("return_msg", self.return_msg.as_ref()),
                    Field::optional("appid", self.appid.as_ref()),
                    Field::optional("mch_id", self.mch_id.as_ref()),
                    Field::optional("nonce_str", self.nonce_str.as_ref()),
                    Field::signature(self.sign.as_deref()),
                    Field::optional("result_code", self.result_code.as_ref()),
                    Field::optional("err_code", self.err_code.as_ref()),
                    Field::optional("err_code_des", self.err_code_des.as_ref()),
                    $( Field::optional($tag, self.$field.as_ref()), )*
                ];
                $(
                    fields.extend(
                        self.$dyn_field
                            .iter()
                            .map(|p| Field::required(p.name.clone(), &p.value)),
                    );
                )?
                fields
            }
        }

        impl $crate::domain::order::GatewayReply for $name {
            fn return_code(&self) -> &str {
                &self.return_code
            }

            fn return_msg(&self) -> Option<&str> {
                self.return_msg.as_deref()
            }

            fn result_code(&self) -> Option<&str> {
                self.result_code.as_deref()
            }

            fn err_code(&self) -> Option<&str> {
                self.err_code.as_deref()
            }

            fn sign(&self) -> Option<&str> {
                self.sign.as_deref()
            }
        }
    };
}
