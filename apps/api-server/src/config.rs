//! Application configuration loaded from environment variables.

use std::env;

const DEFAULT_SECRET: &str = "change-me-in-production";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub auth: AuthSettings,
}

/// Identity-layer settings, read once at startup and never reloaded.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
    pub argon2_time_cost: u32,
    pub revoke_chain_on_replay: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            auth: AuthSettings::from_env(),
        }
    }
}

impl AuthSettings {
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());

        if jwt_secret == DEFAULT_SECRET {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }

        Self {
            jwt_secret,
            access_ttl_minutes: env::var("ACCESS_TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            refresh_ttl_days: env::var("REFRESH_TOKEN_TTL_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7),
            argon2_time_cost: env::var("ARGON2_TIME_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            revoke_chain_on_replay: env::var("REVOKE_CHAIN_ON_REPLAY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
