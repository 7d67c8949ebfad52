//! Status tokens shared by every gateway reply.

/// `return_code` / `result_code` value for success.
pub const SUCCESS: &str = "SUCCESS";

/// `return_code` / `result_code` value for failure.
pub const FAIL: &str = "FAIL";

/// Accessors common to every gateway reply.
///
/// `return_code` reports whether the call reached the gateway and was
/// understood; only then is the reply signed. `result_code` reports the
/// business outcome.
pub trait GatewayReply {
    fn return_code(&self) -> &str;
    fn return_msg(&self) -> Option<&str>;
    fn result_code(&self) -> Option<&str>;
    fn err_code(&self) -> Option<&str>;
    fn sign(&self) -> Option<&str>;

    /// True when `return_code` is `SUCCESS`. Such replies must be verified.
    fn is_success(&self) -> bool {
        self.return_code() == SUCCESS
    }

    /// True when the business result is also `SUCCESS`.
    fn is_business_success(&self) -> bool {
        self.is_success() && self.result_code() == Some(SUCCESS)
    }

    /// The gateway error code of a failed reply.
    fn error_code(&self) -> Option<&str> {
        if self.is_business_success() {
            None
        } else {
            self.err_code()
        }
    }
}
