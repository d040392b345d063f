//! User Password Value Object
//!
//! Domain wrappers over `platform::password`: [`RawPassword`] is the clear
//! text submitted by a client, [`UserPassword`] is the Argon2id hash that is
//! stored.
//!
//! Argon2 is CPU bound, so the async entry points ([`RawPassword::into_hashed`]
//! and [`UserPassword::check_login`]) run it on the blocking thread pool.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;
use std::sync::OnceLock;

/// Stand-in hash verified when a login names no account
static DUMMY_HASH: OnceLock<Option<HashedPassword>> = OnceLock::new();

fn dummy_hash() -> Option<&'static HashedPassword> {
    DUMMY_HASH
        .get_or_init(|| {
            ClearTextPassword::for_verification("no-such-account".to_string())
                .hash(None)
                .ok()
        })
        .as_ref()
}

fn blocking_task_failed(e: tokio::task::JoinError) -> AppError {
    AppError::internal("Password task failed").with_source(e)
}

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input; zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a new password against the registration policy
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::bad_request(format!("Password must be at least {} characters", min))
            }
            PasswordPolicyError::TooLong { max, .. } => {
                AppError::bad_request(format!("Password must be at most {} characters", max))
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a login attempt; no policy checks
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    /// Hash with a fresh salt on the blocking pool
    pub async fn into_hashed(self, pepper: Option<Vec<u8>>) -> AppResult<UserPassword> {
        tokio::task::spawn_blocking(move || UserPassword::from_raw(&self, pepper.as_deref()))
            .await
            .map_err(blocking_task_failed)?
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))?;

        Ok(Self(hashed))
    }

    /// Load a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AppError::internal("Invalid password hash in database"))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Verify a login attempt on the blocking pool
    ///
    /// With no stored hash the dummy hash is verified instead and the result
    /// is always `false`, so an unknown account costs one Argon2 run too.
    pub async fn check_login(
        stored: Option<Self>,
        raw: RawPassword,
        pepper: Option<Vec<u8>>,
    ) -> AppResult<bool> {
        tokio::task::spawn_blocking(move || match stored {
            Some(hash) => hash.verify(&raw, pepper.as_deref()),
            None => {
                if let Some(dummy) = dummy_hash() {
                    dummy.verify(raw.inner(), pepper.as_deref());
                }
                false
            }
        })
        .await
        .map_err(blocking_task_failed)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
