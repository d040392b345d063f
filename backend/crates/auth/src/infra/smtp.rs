//! SMTP Mailer
//!
//! Sends OTP codes through an authenticated SMTP relay. Port 465 uses
//! implicit TLS; any other port upgrades with STARTTLS.

use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;

use crate::domain::mailer::OtpMailer;
use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::{AuthError, AuthResult};

pub const OTP_SUBJECT: &str = "Verify your account";

/// Port for implicit TLS (SMTPS)
const SMTPS_PORT: u16 = 465;

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address; may include a display name
    pub from: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

#[derive(Clone)]
pub struct SmtpOtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpOtpMailer {
    /// Build the pooled transport; no connection is opened until the first
    /// send.
    pub fn new(config: &SmtpConfig) -> AuthResult<Self> {
        let builder = if config.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| AuthError::Internal(format!("Invalid SMTP relay {}: {}", config.host, e)))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from = parse_mailbox(&config.from)
            .map_err(|e| AuthError::Internal(format!("Invalid sender address: {}", e)))?;

        Ok(Self { transport, from })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, lettre::address::AddressError> {
    address.parse()
}

/// Plain-text verification message
fn otp_message(from: &Mailbox, to: &Email, otp: &OtpCode) -> AuthResult<Message> {
    let to = parse_mailbox(to.as_str()).map_err(|e| AuthError::MailDispatch(e.to_string()))?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(OTP_SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(format!("Your verification code is: {}", otp.as_str()))
        .map_err(|e| AuthError::MailDispatch(e.to_string()))
}

impl OtpMailer for SmtpOtpMailer {
    async fn send_otp(&self, to: &Email, otp: &OtpCode) -> AuthResult<()> {
        let message = otp_message(&self.from, to, otp)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AuthError::MailDispatch(e.to_string()))?;

        tracing::info!(email = %to, "OTP email sent");

        Ok(())
    }
}
