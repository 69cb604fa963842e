use std::time::Duration;

use gtm_apify::client::DEFAULT_BASE_URL;
use gtm_core::invoker::{ActorSettings, DEFAULT_ACTOR_ID};
use gtm_core::links::DEFAULT_CONSOLE_URL;

/// Origins allowed when `CORS_ORIGINS` is unset.
const DEFAULT_CORS_ORIGINS: &str =
    "https://shashwatgtm.github.io,http://localhost:3000,https://localhost:3000";

/// Headroom between the actor timeout and the HTTP request timeout.
const REQUEST_TIMEOUT_HEADROOM_SECS: u64 = 120;

/// Configuration that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Apify connection and actor settings.
#[derive(Debug, Clone)]
pub struct ApifyConfig {
    /// API token; `None` when `APIFY_API_TOKEN` is unset or empty.
    pub token: Option<String>,
    pub base_url: String,
    pub console_url: String,
    pub actor_id: String,
    pub timeout_secs: u64,
    pub memory_mbytes: u32,
}

impl ApifyConfig {
    pub fn actor_settings(&self) -> ActorSettings {
        ActorSettings {
            actor_id: self.actor_id.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            memory_mbytes: self.memory_mbytes,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds. Raised to at least the actor
    /// timeout plus 120 seconds.
    pub request_timeout_secs: u64,
    /// Deployment environment name (`development`, `production`, ...).
    pub app_env: String,
    /// Default for `confirm_new_consultation` when the caller omits it.
    pub confirm_new_consultation_default: bool,
    pub apify: ApifyConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                            | Default                       |
    /// |------------------------------------|-------------------------------|
    /// | `HOST`                             | `0.0.0.0`                     |
    /// | `PORT`                             | `3000`                        |
    /// | `CORS_ORIGINS`                     | GitHub Pages + localhost:3000 |
    /// | `REQUEST_TIMEOUT_SECS`             | actor timeout + 120 (minimum) |
    /// | `APP_ENV`                          | `development`                 |
    /// | `CONFIRM_NEW_CONSULTATION_DEFAULT` | `false`                       |
    /// | `APIFY_API_TOKEN`                  | unset                         |
    /// | `APIFY_BASE_URL`                   | `https://api.apify.com/v2`    |
    /// | `APIFY_CONSOLE_URL`                | `https://console.apify.com`   |
    /// | `APIFY_ACTOR_ID`                   | `shashghosh/gtm-alpha-consultant` |
    /// | `APIFY_TIMEOUT_SECS`               | `600`                         |
    /// | `APIFY_MEMORY_MB`                  | `256`                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port: u16 = parse(&lookup, "PORT", "port number", 3000)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timeout_secs: u64 = parse(&lookup, "APIFY_TIMEOUT_SECS", "u64", 600)?;
        let memory_mbytes: u32 = parse(&lookup, "APIFY_MEMORY_MB", "u32", 256)?;
        // Must outlast the actor run plus the client's wait grace.
        let min_request_timeout = timeout_secs + REQUEST_TIMEOUT_HEADROOM_SECS;
        let request_timeout_secs = parse(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            "u64",
            min_request_timeout,
        )?
        .max(min_request_timeout);
        let confirm_new_consultation_default: bool =
            parse(&lookup, "CONFIRM_NEW_CONSULTATION_DEFAULT", "bool", false)?;

        let apify = ApifyConfig {
            token: lookup("APIFY_API_TOKEN").filter(|t| !t.trim().is_empty()),
            base_url: var("APIFY_BASE_URL", DEFAULT_BASE_URL),
            console_url: var("APIFY_CONSOLE_URL", DEFAULT_CONSOLE_URL),
            actor_id: var("APIFY_ACTOR_ID", DEFAULT_ACTOR_ID),
            timeout_secs,
            memory_mbytes,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_env: var("APP_ENV", "development"),
            confirm_new_consultation_default,
            apify,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Whether internal error details may be returned to callers.
    pub fn expose_error_details(&self) -> bool {
        !self.is_production()
    }
}

fn parse<T, F>(lookup: &F, key: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value: raw,
        }),
    }
}
