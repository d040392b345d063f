//! Access Token Issuer
//!
//! HS256 JWTs with claims `{id, role, iat, exp}`. Tokens are verifiable
//! without a database round trip; the stored copy is a record only.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::TokenId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::{token::NewToken, user::User};
use crate::domain::repository::TokenRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Numeric user id
    pub id: i64,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// A signed token and the expiry it was signed with
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation: Validation::new(Algorithm::HS256),
            ttl: config.token_ttl,
        }
    }

    /// Sign a token for `user` valid from `now` for the configured TTL
    pub fn issue(&self, user: &User, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let expires_at = now + self.ttl;
        let claims = AccessClaims {
            id: user.id.value(),
            role: user.role.role_name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature and expiry
    pub fn verify(&self, token: &str) -> AuthResult<AccessClaims> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Bearer token rejected");
                AuthError::InvalidToken
            })
    }

    /// Sign a token and persist its record as an `ACCESS` token
    pub async fn issue_and_store<T>(
        &self,
        repo: &T,
        user: &User,
        now: DateTime<Utc>,
    ) -> AuthResult<String>
    where
        T: TokenRepository + Sync,
    {
        let issued = self.issue(user, now)?;

        let token_id: TokenId = repo
            .save_token(&NewToken::access(
                user.id,
                issued.token.clone(),
                issued.expires_at,
            ))
            .await?;

        tracing::debug!(user_id = %user.id, token_id = %token_id, "Access token stored");

        Ok(issued.token)
    }
}
