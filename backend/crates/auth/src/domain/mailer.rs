//! Mailer Trait
//!
//! Outbound delivery of verification codes. Implementation is in
//! infrastructure layer.

use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::AuthResult;

#[trait_variant::make(OtpMailer: Send)]
pub trait LocalOtpMailer {
    /// Deliver `otp` to `to`; failures surface as `AuthError::MailDispatch`
    async fn send_otp(&self, to: &Email, otp: &OtpCode) -> AuthResult<()>;
}
