//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible local-development default; nothing here is
//! secret (the demo credentials are intentionally public).

use std::env;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Deployment environment ("development" or "production")
    pub environment: String,
    /// Requests allowed per rate-limit window, per client IP
    pub rate_limit_max: u32,
    /// Rate-limit window length in seconds
    pub rate_limit_window_secs: u64,
    /// Demo login email
    pub demo_email: String,
    /// Demo login password
    pub demo_password: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 5000,
            frontend_url: "http://localhost:3000".to_string(),
            environment: "development".to_string(),
            rate_limit_max: 100,
            rate_limit_window_secs: 15 * 60,
            demo_email: "demo@frenup.com".to_string(),
            demo_password: "demo123".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", 5000)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            rate_limit_max: parse_var("RATE_LIMIT_MAX", 100)?,
            rate_limit_window_secs: parse_var("RATE_LIMIT_WINDOW_SECS", 15 * 60)?,
            demo_email: env::var("DEMO_EMAIL").unwrap_or_else(|_| "demo@frenup.com".to_string()),
            demo_password: env::var("DEMO_PASSWORD").unwrap_or_else(|_| "demo123".to_string()),
        })
    }

    /// Whether we are running in development mode (verbose error bodies).
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Rate-limit window as a `Duration`.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

/// Read an env var and parse it, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
