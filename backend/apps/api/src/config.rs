//! API Configuration
//!
//! Reads the process environment (after `.env` is loaded by `dotenvy`).

use anyhow::{Context, bail};
use auth::{AuthConfig, SmtpConfig};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

pub struct ApiConfig {
    /// `APP_ENV=production`
    pub production: bool,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub database: PgConnectOptions,
    pub auth: AuthConfig,
    pub smtp: SmtpConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).with_context(|| format!("{} must be set", key));

        let production = get("APP_ENV").is_some_and(|env| env.eq_ignore_ascii_case("production"));

        let port = match get("PORT") {
            Some(port) => port.parse().with_context(|| format!("Invalid PORT: {}", port))?,
            None => DEFAULT_PORT,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        // Database: a full URL wins over the individual parts
        let database = match get("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url).context("Invalid DATABASE_URL")?,
            None => {
                let db_port = match get("DB_PORT") {
                    Some(p) => p.parse().with_context(|| format!("Invalid DB_PORT: {}", p))?,
                    None => DEFAULT_DB_PORT,
                };
                let mut options = PgConnectOptions::new()
                    .host(&require("DB_HOST")?)
                    .port(db_port)
                    .username(&require("DB_USER")?)
                    .database(&require("DB_NAME")?);
                if let Some(password) = get("DB_PASSWORD") {
                    options = options.password(&password);
                }
                options
            }
        };
        let database = if production {
            database.ssl_mode(PgSslMode::Require)
        } else {
            database
        };

        let mut auth = match get("JWT_SECRET") {
            Some(secret) => AuthConfig::new(secret.into_bytes()),
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random secret for this process");
                AuthConfig::with_random_secret()
            }
            None => bail!("JWT_SECRET must be set in release builds"),
        };
        if let Some(pepper) = get("PASSWORD_PEPPER") {
            auth = auth.with_pepper(pepper.into_bytes());
        }

        let email_user = require("EMAIL_USER")?;
        let smtp = SmtpConfig {
            host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port: match get("SMTP_PORT") {
                Some(p) => p.parse().with_context(|| format!("Invalid SMTP_PORT: {}", p))?,
                None => DEFAULT_SMTP_PORT,
            },
            from: get("EMAIL_FROM").unwrap_or_else(|| email_user.clone()),
            username: email_user,
            password: require("EMAIL_PASS")?,
        };

        Ok(Self {
            production,
            port,
            frontend_origins,
            database,
            auth,
            smtp,
        })
    }
}
