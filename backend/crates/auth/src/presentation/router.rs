//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::mailer::OtpMailer;
use crate::domain::repository::{RoleRepository, TokenRepository, UserRepository};
use crate::infra::{postgres::PgAuthRepository, smtp::SmtpOtpMailer};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Create the Auth router with the PostgreSQL repository and SMTP mailer
pub fn auth_router(repo: PgAuthRepository, mailer: SmtpOtpMailer, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository and mailer implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: UserRepository + RoleRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, mailer, config);

    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/verify-otp", post(handlers::verify_otp::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .with_state(state)
        .merge(protected)
}
