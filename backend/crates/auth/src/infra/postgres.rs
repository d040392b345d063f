//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{RoleId, TokenId, UserId};
use sqlx::PgPool;
use std::future::Future;

use crate::domain::entity::{
    role::Role,
    token::NewToken,
    user::{NewUser, User},
};
use crate::domain::repository::{RoleRepository, TokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, otp_code::OtpCode, public_id::PublicId, role_name::RoleName,
    user_name::UserName, user_password::UserPassword, verification::Verification,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Current time according to the database (startup connectivity check)
    pub async fn database_time(&self) -> AuthResult<DateTime<Utc>> {
        let now: DateTime<Utc> = sqlx::query_scalar("SELECT NOW()")
            .fetch_one(&self.pool)
            .await?;

        Ok(now)
    }
}

/// Unique violations on insert mean a concurrent registration won
fn map_insert_error(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                u.id,
                u.u_id,
                u.username,
                u.email,
                u.password,
                u.role_id,
                r.role_name,
                u.otp_code,
                u.otp_expires_at,
                u.verified
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE u.email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn create_unverified<F>(&self, new_user: &NewUser, dispatch: F) -> AuthResult<User>
    where
        F: Future<Output = AuthResult<()>> + Send,
    {
        let mut tx = self.pool.begin().await?;

        // The public id is derived from the key, so take the key first.
        let id: i64 = sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence('users', 'id'))")
            .fetch_one(&mut *tx)
            .await?;
        let user = new_user.clone().into_user(UserId::new(id));

        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                u_id,
                username,
                email,
                password,
                role_id,
                otp_code,
                otp_expires_at,
                verified
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
            "#,
        )
        .bind(id)
        .bind(user.public_id.as_str())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.role.id.value())
        .bind(new_user.otp.as_str())
        .bind(new_user.otp_expires_at)
        .execute(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        if let Err(e) = dispatch.await {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Registration rollback failed");
            }
            return Err(e);
        }

        tx.commit().await.map_err(map_insert_error)?;

        Ok(user)
    }

    async fn consume_otp(
        &self,
        user_id: UserId,
        otp: &OtpCode,
        now: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET verified = TRUE,
                otp_code = NULL,
                otp_expires_at = NULL
            WHERE id = $1
              AND verified = FALSE
              AND otp_code = $2
              AND otp_expires_at >= $3
            "#,
        )
        .bind(user_id.value())
        .bind(otp.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgAuthRepository {
    async fn find_role_by_name(&self, name: &RoleName) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, role_name FROM roles WHERE UPPER(role_name) = $1",
        )
        .bind(name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Role::new(RoleId::new(r.id), r.role_name)))
    }
}

// ============================================================================
// Token Repository Implementation
// ============================================================================

impl TokenRepository for PgAuthRepository {
    async fn save_token(&self, token: &NewToken) -> AuthResult<TokenId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tokens (user_id, token, token_type, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(token.user_id.value())
        .bind(&token.token)
        .bind(token.token_type.as_str())
        .bind(token.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(TokenId::new(id))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    u_id: String,
    username: String,
    email: String,
    password: String,
    role_id: i64,
    role_name: String,
    otp_code: Option<String>,
    otp_expires_at: Option<DateTime<Utc>>,
    verified: bool,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = UserPassword::from_phc_string(self.password)?;
        let verification = Verification::from_db(self.verified, self.otp_code, self.otp_expires_at)
            .map_err(|e| AuthError::Internal(format!("User {}: {}", self.id, e.message())))?;

        Ok(User {
            id: UserId::new(self.id),
            public_id: PublicId::from_db(self.u_id),
            username: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            password,
            role: Role::new(RoleId::new(self.role_id), self.role_name),
            verification,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    role_name: String,
}
