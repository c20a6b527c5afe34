use anyhow::{Context, Result};

/// Shared secret accepted when `API_KEY` is unset.
/// Insecure by default: any deployment without `API_KEY` accepts this literal.
pub const DEFAULT_SHARED_SECRET: &str = "BONGA_SERVER";

const DEFAULT_PARSER_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_REGION: &str = "us-east-1";

/// Application configuration loaded from environment variables.
/// Only `DATABASE_URL` is required; everything else degrades or falls back.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// `API_KEY`. Used both as the inbound shared secret and as the credential
    /// forwarded to the parser service. The two concerns share one secret.
    pub api_key: Option<String>,
    pub parser_base_url: String,
    pub storage: StorageConfig,
}

/// Object storage settings. A missing bucket leaves uploads unavailable.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            api_key: optional_env("API_KEY"),
            parser_base_url: optional_env("PARSER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PARSER_BASE_URL.to_string()),
            storage: StorageConfig {
                bucket: optional_env("AWS_S3_BUCKET"),
                endpoint: optional_env("S3_ENDPOINT"),
                region: optional_env("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
                secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
            },
        })
    }

    /// The value clients must send in `Authorization` on gated routes.
    pub fn shared_secret(&self) -> &str {
        self.api_key.as_deref().unwrap_or(DEFAULT_SHARED_SECRET)
    }

    /// Token forwarded to the parser. `None` is a deployment misconfiguration.
    pub fn parser_token(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn uses_default_secret(&self) -> bool {
        self.api_key.is_none()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Empty values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
impl Config {
    pub fn for_tests(api_key: Option<&str>) -> Self {
        Config {
            database_url: "postgres://localhost/bonga_test".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            api_key: api_key.map(str::to_string),
            parser_base_url: DEFAULT_PARSER_BASE_URL.to_string(),
            storage: StorageConfig {
                region: DEFAULT_REGION.to_string(),
                ..StorageConfig::default()
            },
        }
    }
}
