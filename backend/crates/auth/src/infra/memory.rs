//! In-Memory Implementations
//!
//! Process-local repository and mailer used by the unit tests.
//! They follow the same contracts as the PostgreSQL repository and the SMTP
//! mailer.

use chrono::{DateTime, Utc};
use kernel::id::{RoleId, TokenId, UserId};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::entity::{
    role::{ROLE_ADMIN, ROLE_USER, Role},
    token::NewToken,
    user::{NewUser, User},
};
use crate::domain::mailer::OtpMailer;
use crate::domain::repository::{RoleRepository, TokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, otp_code::OtpCode, role_name::RoleName};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Repository
// ============================================================================

#[derive(Default)]
struct Store {
    last_user_id: i64,
    last_token_id: i64,
    roles: Vec<Role>,
    users: Vec<User>,
    tokens: Vec<(TokenId, NewToken)>,
}

/// In-memory auth repository seeded with the `USER` and `ADMIN` roles
#[derive(Clone)]
pub struct InMemoryAuthRepository {
    store: Arc<Mutex<Store>>,
}

impl Default for InMemoryAuthRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        let store = Store {
            roles: vec![
                Role::new(RoleId::new(1), ROLE_USER),
                Role::new(RoleId::new(2), ROLE_ADMIN),
            ],
            ..Store::default()
        };

        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Tokens persisted for `user_id`, oldest first
    pub fn tokens_for(&self, user_id: UserId) -> Vec<NewToken> {
        self.lock()
            .tokens
            .iter()
            .filter(|(_, token)| token.user_id == user_id)
            .map(|(_, token)| token.clone())
            .collect()
    }

    /// Apply `f` to the stored user with `email`; returns false if absent
    pub fn update_user(&self, email: &Email, f: impl FnOnce(&mut User)) -> bool {
        let mut store = self.lock();
        match store.users.iter_mut().find(|u| &u.email == email) {
            Some(user) => {
                f(user);
                true
            }
            None => false,
        }
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.lock().users.iter().any(|u| &u.email == email))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| &u.email == email).cloned())
    }

    async fn create_unverified<F>(&self, new_user: &NewUser, dispatch: F) -> AuthResult<User>
    where
        F: Future<Output = AuthResult<()>> + Send,
    {
        // Reserve an id the way a sequence would; the guard must be released
        // before awaiting the dispatch.
        let id = {
            let mut store = self.lock();
            if store.users.iter().any(|u| u.email == new_user.email) {
                return Err(AuthError::EmailTaken);
            }
            store.last_user_id += 1;
            UserId::new(store.last_user_id)
        };

        dispatch.await?;

        let user = new_user.clone().into_user(id);
        let mut store = self.lock();
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        store.users.push(user.clone());

        Ok(user)
    }

    async fn consume_otp(
        &self,
        user_id: UserId,
        otp: &OtpCode,
        now: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let mut store = self.lock();
        let Some(user) = store.users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(false);
        };

        if !user.verification.accepts(otp, now) {
            return Ok(false);
        }
        user.mark_verified();

        Ok(true)
    }
}

impl RoleRepository for InMemoryAuthRepository {
    async fn find_role_by_name(&self, name: &RoleName) -> AuthResult<Option<Role>> {
        Ok(self.lock().roles.iter().find(|r| r.is(name)).cloned())
    }
}

impl TokenRepository for InMemoryAuthRepository {
    async fn save_token(&self, token: &NewToken) -> AuthResult<TokenId> {
        let mut store = self.lock();
        store.last_token_id += 1;
        let id = TokenId::new(store.last_token_id);
        store.tokens.push((id, token.clone()));
        Ok(id)
    }
}

// ============================================================================
// Mailer
// ============================================================================

/// Mailer that records every OTP instead of sending it
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<(Email, OtpCode)>>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mailer whose every dispatch fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Most recent code sent to `email`
    pub fn last_otp_for(&self, email: &Email) -> Option<OtpCode> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, otp)| otp.clone())
    }
}

impl OtpMailer for RecordingMailer {
    async fn send_otp(&self, to: &Email, otp: &OtpCode) -> AuthResult<()> {
        if self.fail {
            return Err(AuthError::MailDispatch("mail transport unavailable".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((to.clone(), otp.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use chrono::Duration;

    fn new_user(email: &str) -> NewUser {
        let raw = RawPassword::new("pw123456".to_string()).unwrap();
        NewUser {
            username: UserName::new("alice").unwrap(),
            email: Email::new(email).unwrap(),
            password: UserPassword::from_raw(&raw, None).unwrap(),
            role: Role::new(RoleId::new(1), ROLE_USER),
            otp: OtpCode::from_db("123456"),
            otp_expires_at: Utc::now() + Duration::minutes(10),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryAuthRepository::new();
        let a = repo
            .create_unverified(&new_user("a@example.com"), async { Ok(()) })
            .await
            .unwrap();
        let b = repo
            .create_unverified(&new_user("b@example.com"), async { Ok(()) })
            .await
            .unwrap();

        assert_eq!(a.public_id.as_str(), "USR000001");
        assert_eq!(b.public_id.as_str(), "USR000002");
        assert_eq!(repo.user_count(), 2);
    }

    #[tokio::test]
    async fn test_create_rolls_back_on_dispatch_failure() {
        let repo = InMemoryAuthRepository::new();
        let result = repo
            .create_unverified(&new_user("a@example.com"), async {
                Err(AuthError::MailDispatch("down".into()))
            })
            .await;

        assert!(matches!(result, Err(AuthError::MailDispatch(_))));
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repo = InMemoryAuthRepository::new();
        repo.create_unverified(&new_user("a@example.com"), async { Ok(()) })
            .await
            .unwrap();
        let result = repo
            .create_unverified(&new_user("a@example.com"), async { Ok(()) })
            .await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_consume_otp_once() {
        let repo = InMemoryAuthRepository::new();
        let user = repo
            .create_unverified(&new_user("a@example.com"), async { Ok(()) })
            .await
            .unwrap();
        let otp = OtpCode::from_db("123456");

        assert!(repo.consume_otp(user.id, &otp, Utc::now()).await.unwrap());
        assert!(!repo.consume_otp(user.id, &otp, Utc::now()).await.unwrap());

        let stored = repo.find_by_email(&user.email).await.unwrap().unwrap();
        assert!(stored.is_verified());
    }

    #[tokio::test]
    async fn test_role_lookup_case_insensitive() {
        let repo = InMemoryAuthRepository::new();
        let role = repo
            .find_role_by_name(&RoleName::new("admin").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(role.role_name, ROLE_ADMIN);

        assert!(
            repo.find_role_by_name(&RoleName::new("superuser").unwrap())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_recording_mailer() {
        let mailer = RecordingMailer::new();
        let email = Email::new("a@example.com").unwrap();
        mailer.send_otp(&email, &OtpCode::from_db("111111")).await.unwrap();
        mailer.send_otp(&email, &OtpCode::from_db("222222")).await.unwrap();

        assert_eq!(mailer.sent_count(), 2);
        assert_eq!(mailer.last_otp_for(&email).unwrap().as_str(), "222222");

        let failing = RecordingMailer::failing();
        assert!(failing.send_otp(&email, &OtpCode::from_db("1")).await.is_err());
        assert_eq!(failing.sent_count(), 0);
    }
}
