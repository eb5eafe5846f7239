// ABOUTME: Runtime configuration loaded from environment variables with logged defaults
// ABOUTME: Covers the bind address, database URL, cookie security and token lifetime

use anyhow::{ensure, Context, Result};
use std::{env, fmt::Display, str::FromStr};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub secure_cookies: bool,
    pub token_max_age_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "sqlite:acronyms.db?mode=rwc".to_string(),
            secure_cookies: false,
            token_max_age_secs: 24 * 60 * 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            host: try_load("HOST", defaults.host)?,
            port: try_load("PORT", defaults.port)?,
            database_url: try_load("DATABASE_URL", defaults.database_url)?,
            secure_cookies: try_load("SECURE_COOKIES", defaults.secure_cookies)?,
            token_max_age_secs: try_load("TOKEN_MAX_AGE_SECS", defaults.token_max_age_secs)?,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.token_max_age_secs > 0,
            "TOKEN_MAX_AGE_SECS must be positive, got {}",
            self.token_max_age_secs
        );
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw:?}")),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_falls_back_to_default() {
        let port: u16 = try_load("ACRONYMS_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_token_lifetime_must_be_positive() {
        assert!(Config::default().validate().is_ok());

        for token_max_age_secs in [0, -60] {
            let config = Config {
                token_max_age_secs,
                ..Config::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_try_load_rejects_garbage() {
        env::set_var("ACRONYMS_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = try_load("ACRONYMS_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }
}
