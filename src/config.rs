/*
 * Responsibility
 * - 環境変数 (.env) からの設定読み込み
 * - 設定値のバリデーション (不足なら起動失敗)
 * - Auth gate / HTTP layer に渡す値の組み立て
 */
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::middleware::auth::DEFAULT_HEADER_PREFIX;
use crate::middleware::http::HttpLimits;
use crate::services::auth::{EnvironmentPolicy, VerifierOptions};
use crate::services::crypto::key_codec::decode_base64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
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

pub struct Config {
    pub addr: SocketAddr,

    // Identifier of the running environment (APP_ENV), used verbatim by the
    // auth bypass policy.
    pub environment: String,
    pub app_env: AppEnv,
    pub auth_disabled_in: Option<String>,

    // Shared HMAC secret. Never printed.
    pub auth_signing_key: Vec<u8>,
    pub auth_header_prefix: String,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,

    pub http_limits: HttpLimits,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("environment", &self.environment)
            .field("auth_disabled_in", &self.auth_disabled_in)
            .field("auth_signing_key", &"[REDACTED]")
            .field("auth_header_prefix", &self.auth_header_prefix)
            .field("auth_issuer", &self.auth_issuer)
            .field("auth_audience", &self.auth_audience)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("http_limits", &self.http_limits)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (process env in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port: u16 = match optional("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let environment = optional("APP_ENV").unwrap_or_else(|| "development".to_string());
        let app_env = AppEnv::from_name(&environment);
        let auth_disabled_in = optional("AUTH_DISABLED_IN");

        let auth_signing_key = optional("AUTH_SIGNING_KEY")
            .ok_or(ConfigError::Missing("AUTH_SIGNING_KEY"))
            .and_then(|v| {
                decode_base64(&v).map_err(|_| ConfigError::Invalid("AUTH_SIGNING_KEY"))
            })?;
        if auth_signing_key.is_empty() {
            return Err(ConfigError::Invalid("AUTH_SIGNING_KEY"));
        }

        // Not trimmed: the trailing space of "Bearer " is significant.
        let auth_header_prefix = lookup("AUTH_HEADER_PREFIX")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HEADER_PREFIX.to_string());

        let auth_issuer = optional("AUTH_ISSUER");
        let auth_audience = optional("AUTH_AUDIENCE");

        let access_token_leeway_seconds = parse_or("ACCESS_TOKEN_LEEWAY_SECONDS", &optional, 60)?;

        let defaults = HttpLimits::default();
        let http_limits = HttpLimits {
            body_limit_bytes: parse_or(
                "HTTP_BODY_LIMIT_BYTES",
                &optional,
                defaults.body_limit_bytes,
            )?,
            timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECONDS",
                &optional,
                defaults.timeout.as_secs(),
            )?),
        };

        Ok(Self {
            addr,
            environment,
            app_env,
            auth_disabled_in,
            auth_signing_key,
            auth_header_prefix,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            http_limits,
        })
    }

    pub fn environment_policy(&self) -> EnvironmentPolicy {
        EnvironmentPolicy::new(
            self.auth_disabled_in.clone(),
            Some(self.environment.clone()),
        )
    }

    pub fn verifier_options(&self) -> VerifierOptions {
        VerifierOptions {
            issuer: self.auth_issuer.clone(),
            audience: self.auth_audience.clone(),
            leeway_seconds: self.access_token_leeway_seconds,
        }
    }
}

fn parse_or<T, F>(key: &'static str, optional: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match optional(key) {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}
