//! Register Use Case
//!
//! Creates an unverified account and emails its OTP.

use chrono::Utc;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::mailer::OtpMailer;
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    otp_code::OtpCode,
    role_name::RoleName,
    user_name::UserName,
    user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Register output
pub struct RegisterOutput {
    /// Normalized address the OTP was sent to
    pub email: Email,
}

/// Register use case
pub struct RegisterUseCase<R, M>
where
    R: UserRepository + RoleRepository,
    M: OtpMailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> RegisterUseCase<R, M>
where
    R: UserRepository + RoleRepository,
    M: OtpMailer,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let username = UserName::new(&input.username)?;
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let role_name = RoleName::new(&input.role)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let role = self
            .repo
            .find_role_by_name(&role_name)
            .await?
            .ok_or(AuthError::InvalidRole)?;

        let password = raw_password
            .into_hashed(self.config.pepper().map(<[u8]>::to_vec))
            .await?;

        let new_user = NewUser {
            username,
            email,
            password,
            role,
            otp: OtpCode::generate(),
            otp_expires_at: Utc::now() + self.config.otp_ttl,
        };

        let dispatch = self.mailer.send_otp(&new_user.email, &new_user.otp);
        let user = self.repo.create_unverified(&new_user, dispatch).await?;

        tracing::info!(
            user_id = %user.id,
            u_id = %user.public_id,
            email = %user.email,
            "User registered, awaiting verification"
        );

        Ok(RegisterOutput { email: user.email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::{InMemoryAuthRepository, RecordingMailer};

    fn input(email: &str, role: &str) -> RegisterInput {
        RegisterInput {
            username: "alice".to_string(),
            email: email.to_string(),
            password: "pw123456".to_string(),
            role: role.to_string(),
        }
    }

    fn use_case(
        repo: &InMemoryAuthRepository,
        mailer: &RecordingMailer,
    ) -> RegisterUseCase<InMemoryAuthRepository, RecordingMailer> {
        RegisterUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(mailer.clone()),
            Arc::new(AuthConfig::new(b"test-secret".to_vec())),
        )
    }

    #[tokio::test]
    async fn test_register_sends_otp_and_stores_pending_user() {
        let repo = InMemoryAuthRepository::new();
        let mailer = RecordingMailer::new();

        let output = use_case(&repo, &mailer)
            .execute(input(" Alice@Example.com ", "user"))
            .await
            .unwrap();

        assert_eq!(output.email.as_str(), "alice@example.com");
        assert_eq!(mailer.sent_count(), 1);

        let user = repo.find_by_email(&output.email).await.unwrap().unwrap();
        assert!(!user.is_verified());
        assert_eq!(user.role.role_name, "USER");
        assert_eq!(user.public_id.as_str(), "USR000001");

        let sent = mailer.last_otp_for(&output.email).unwrap();
        assert_eq!(user.verification.otp(), Some(&sent));
        assert_eq!(sent.as_str().len(), 6);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let repo = InMemoryAuthRepository::new();
        let mailer = RecordingMailer::new();
        let uc = use_case(&repo, &mailer);

        uc.execute(input("alice@example.com", "USER")).await.unwrap();
        let err = uc
            .execute(input("ALICE@example.com", "USER"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(err.to_string(), "User already exists");
        assert_eq!(repo.user_count(), 1);
        assert_eq!(mailer.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_register_unknown_role() {
        let repo = InMemoryAuthRepository::new();
        let mailer = RecordingMailer::new();

        let result = use_case(&repo, &mailer)
            .execute(input("alice@example.com", "superuser"))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidRole)));
        assert_eq!(repo.user_count(), 0);
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_register_mail_failure_leaves_no_user() {
        let repo = InMemoryAuthRepository::new();
        let mailer = RecordingMailer::failing();

        let result = use_case(&repo, &mailer)
            .execute(input("alice@example.com", "USER"))
            .await;

        assert!(matches!(result, Err(AuthError::MailDispatch(_))));
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let repo = InMemoryAuthRepository::new();
        let mailer = RecordingMailer::new();
        let uc = use_case(&repo, &mailer);

        let mut bad_email = input("not-an-email", "USER");
        assert!(matches!(
            uc.execute(bad_email).await,
            Err(AuthError::Validation(_))
        ));

        bad_email = input("alice@example.com", "USER");
        bad_email.password = "short".to_string();
        assert!(matches!(
            uc.execute(bad_email).await,
            Err(AuthError::Validation(_))
        ));

        assert_eq!(repo.user_count(), 0);
    }
}
