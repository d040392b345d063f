//! Verification State Value Object
//!
//! An account is either waiting for its OTP or verified. The only
//! transition is `Pending -> Verified`.

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};

use super::otp_code::OtpCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Pending {
        otp: OtpCode,
        expires_at: DateTime<Utc>,
    },
    Verified,
}

impl Verification {
    pub fn is_verified(&self) -> bool {
        matches!(self, Verification::Verified)
    }

    /// True iff the account is pending, the code matches, and it has not
    /// expired (`now <= expires_at`)
    pub fn accepts(&self, submitted: &OtpCode, now: DateTime<Utc>) -> bool {
        match self {
            Verification::Pending { otp, expires_at } => otp.matches(submitted) && now <= *expires_at,
            Verification::Verified => false,
        }
    }

    pub fn otp(&self) -> Option<&OtpCode> {
        match self {
            Verification::Pending { otp, .. } => Some(otp),
            Verification::Verified => None,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Verification::Pending { expires_at, .. } => Some(*expires_at),
            Verification::Verified => None,
        }
    }

    /// Rebuild from the `verified`, `otp_code`, `otp_expires_at` columns
    pub fn from_db(
        verified: bool,
        otp_code: Option<String>,
        otp_expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        if verified {
            return Ok(Verification::Verified);
        }
        match (otp_code, otp_expires_at) {
            (Some(code), Some(expires_at)) => Ok(Verification::Pending {
                otp: OtpCode::from_db(code),
                expires_at,
            }),
            _ => Err(AppError::internal(
                "Unverified user is missing OTP columns",
            )),
        }
    }
}
