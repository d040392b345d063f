//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AccessClaims, LoginUseCase, RegisterUseCase, TokenIssuer, VerifyOtpUseCase,
};
use crate::domain::mailer::OtpMailer;
use crate::domain::repository::{RoleRepository, TokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthTokenResponse, LOGGED_IN_MESSAGE, LoginRequest, MeResponse, REGISTERED_MESSAGE,
    RegisterRequest, RegisterResponse, UserResponse, VERIFIED_MESSAGE, VerifyOtpRequest,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + RoleRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub tokens: Arc<TokenIssuer>,
    pub config: Arc<AuthConfig>,
}

impl<R, M> AuthAppState<R, M>
where
    R: UserRepository + RoleRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, mailer: M, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            mailer: Arc::new(mailer),
            tokens: Arc::new(TokenIssuer::new(&config)),
            config: Arc::new(config),
        }
    }
}

/// Unwrap a JSON body, turning extractor rejections into 400s
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::Validation(rejection.body_text()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + RoleRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let input = json_body(payload)?.into_input()?;

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: REGISTERED_MESSAGE.to_string(),
            email: output.email.to_string(),
        }),
    ))
}

// ============================================================================
// Verify OTP
// ============================================================================

/// POST /api/auth/verify-otp
pub async fn verify_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> AuthResult<Json<AuthTokenResponse>>
where
    R: UserRepository + RoleRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let input = json_body(payload)?.into_input()?;

    let use_case = VerifyOtpUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case.execute(input).await?;

    Ok(Json(AuthTokenResponse {
        message: VERIFIED_MESSAGE.to_string(),
        user: UserResponse::from(&output.user),
        token: output.token,
    }))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<AuthTokenResponse>>
where
    R: UserRepository + RoleRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let input = json_body(payload)?.into_input()?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(input).await?;

    Ok(Json(AuthTokenResponse {
        message: LOGGED_IN_MESSAGE.to_string(),
        user: UserResponse::from(&output.user),
        token: output.token,
    }))
}

// ============================================================================
// Token Introspection
// ============================================================================

/// GET /api/auth/me
///
/// Claims are placed in the request extensions by `require_bearer`.
pub async fn me(Extension(claims): Extension<AccessClaims>) -> Json<MeResponse> {
    Json(MeResponse::from(claims))
}
