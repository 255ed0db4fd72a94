/*
 * Responsibility
 * - load settings from the environment (.env via dotenvy)
 * - validate them; missing required values abort startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::auth::token::DEFAULT_TTL_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // None selects the in-memory store (development only).
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    pub access_token_secret: String,
    pub access_token_ttl_seconds: u64,

    // None disables the payment-intent route (503).
    pub payment_secret_key: Option<String>,
    pub payment_api_base: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print secrets or credentials embedded in the database URL
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("database", &self.database_url.as_ref().map(|_| "<set>"))
            .field("database_max_connections", &self.database_max_connections)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("payments_enabled", &self.payment_secret_key.is_some())
            .field("payment_api_base", &self.payment_api_base)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match var("PORT") {
            Some(s) => s.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 5000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV").as_deref());

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let database_url = var("DATABASE_URL");
        if database_url.is_none() && app_env.is_production() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(s) => s
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?,
            None => 5,
        };

        let access_token_secret =
            var("ACCESS_TOKEN_SECRET").ok_or(ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;

        let access_token_ttl_seconds = match var("ACCESS_TOKEN_TTL_SECONDS") {
            Some(s) => s
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))?,
            None => DEFAULT_TTL_SECONDS,
        };

        let payment_secret_key = var("PAYMENT_SECRET_KEY");
        let payment_api_base =
            var("PAYMENT_API_BASE").unwrap_or_else(|| "https://api.stripe.com".to_string());

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            database_url,
            database_max_connections,
            access_token_secret,
            access_token_ttl_seconds,
            payment_secret_key,
            payment_api_base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_with_only_the_secret() {
        let config = load(&[("ACCESS_TOKEN_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.addr.port(), 5000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.access_token_ttl_seconds, 5 * 60 * 60);
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.payment_secret_key, None);
        assert_eq!(config.payment_api_base, "https://api.stripe.com");
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(
            load(&[]).err(),
            Some(ConfigError::Missing("ACCESS_TOKEN_SECRET"))
        );
        assert_eq!(
            load(&[("ACCESS_TOKEN_SECRET", "  ")]).err(),
            Some(ConfigError::Missing("ACCESS_TOKEN_SECRET"))
        );
    }

    #[test]
    fn production_requires_a_database() {
        let err = load(&[("ACCESS_TOKEN_SECRET", "s"), ("APP_ENV", "prod")]).err();
        assert_eq!(err, Some(ConfigError::Missing("DATABASE_URL")));

        let config = load(&[
            ("ACCESS_TOKEN_SECRET", "s"),
            ("APP_ENV", "Production"),
            ("DATABASE_URL", "postgres://localhost/powertool"),
        ])
        .unwrap();
        assert!(config.app_env.is_production());
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert_eq!(
            load(&[("ACCESS_TOKEN_SECRET", "s"), ("PORT", "http")]).err(),
            Some(ConfigError::Invalid("PORT"))
        );
        assert_eq!(
            load(&[("ACCESS_TOKEN_SECRET", "s"), ("ACCESS_TOKEN_TTL_SECONDS", "0")]).err(),
            Some(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))
        );
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[
            ("ACCESS_TOKEN_SECRET", "s"),
            ("CORS_ALLOWED_ORIGINS", " https://a.example , ,https://b.example"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn debug_hides_secrets() {
        let config = load(&[
            ("ACCESS_TOKEN_SECRET", "very-secret"),
            ("PAYMENT_SECRET_KEY", "sk_live_x"),
            ("DATABASE_URL", "postgres://u:pw@host/db"),
        ])
        .unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("very-secret"));
        assert!(!printed.contains("sk_live_x"));
        assert!(!printed.contains("pw@host"));
    }
}
