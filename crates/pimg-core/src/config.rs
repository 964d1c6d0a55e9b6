//! Configuration module
//!
//! Server settings and GitHub upstream settings, read once from the environment
//! at startup and passed around immutably.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::storage_strategy::StorageStrategy;

// Common constants
const SERVER_PORT: u16 = 8787;
const MAX_UPLOAD_SIZE_MB: usize = 10;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const GITHUB_API_BASE_URL: &str = "https://api.github.com";
const GITHUB_USER_AGENT: &str = "Pimg-Worker";
const GITHUB_REQUEST_TIMEOUT_SECS: u64 = 30;
const GITHUB_BRANCH: &str = "main";
const GITHUB_COMMIT_PATH: &str = "images";

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    /// Origin used when synthesizing image URLs. Derived from the request when unset.
    pub public_base_url: Option<String>,
    pub max_upload_size_bytes: usize,
    /// Server-wide cap on in-flight requests.
    pub http_concurrency_limit: usize,
}

/// GitHub upstream settings
#[derive(Clone, Debug)]
pub struct GitHubConfig {
    pub api_base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Visibility of created gists; secret by default.
    pub gist_public: bool,
    pub default_repository: Option<String>,
    pub branch: String,
    /// Repository directory that committed images land in.
    pub commit_path: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub github: GitHubConfig,
    pub storage_strategy: StorageStrategy,
}

/// Read `key`, falling back to `default` when unset. A set value that does not
/// parse is an error.
fn parse_env<T>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
{
    match optional_env(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("{} has invalid value {:?}: {}", key, value, e))
}

fn megabytes_to_bytes(megabytes: usize) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", megabytes))
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl Config {
    /// Load `.env` (if present) and read configuration from the environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let storage_strategy = match optional_env("STORAGE_STRATEGY") {
            Some(value) => value.parse()?,
            None => StorageStrategy::Gist,
        };

        let config = Config {
            base: BaseConfig {
                server_port: parse_env("PORT", SERVER_PORT)?,
                environment,
                public_base_url: optional_env("PUBLIC_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string()),
                max_upload_size_bytes: megabytes_to_bytes(parse_env(
                    "MAX_UPLOAD_SIZE_MB",
                    MAX_UPLOAD_SIZE_MB,
                )?)?,
                http_concurrency_limit: parse_env("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT)?
                    .max(1),
            },
            github: GitHubConfig {
                api_base_url: optional_env("GITHUB_API_BASE_URL")
                    .unwrap_or_else(|| GITHUB_API_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                user_agent: optional_env("GITHUB_USER_AGENT")
                    .unwrap_or_else(|| GITHUB_USER_AGENT.to_string()),
                request_timeout_secs: parse_env(
                    "GITHUB_REQUEST_TIMEOUT_SECS",
                    GITHUB_REQUEST_TIMEOUT_SECS,
                )?,
                gist_public: match optional_env("GIST_PUBLIC") {
                    Some(value) => parse_value("GIST_PUBLIC", &value.to_lowercase())?,
                    None => false,
                },
                default_repository: optional_env("GITHUB_DEFAULT_REPOSITORY"),
                branch: optional_env("GITHUB_BRANCH").unwrap_or_else(|| GITHUB_BRANCH.to_string()),
                commit_path: optional_env("GITHUB_COMMIT_PATH")
                    .unwrap_or_else(|| GITHUB_COMMIT_PATH.to_string())
                    .trim_matches('/')
                    .to_string(),
            },
            storage_strategy,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than 0"));
        }

        if self.base.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if !is_http_url(&self.github.api_base_url) {
            return Err(anyhow::anyhow!(
                "GITHUB_API_BASE_URL must be an http(s) URL"
            ));
        }

        if let Some(ref url) = self.base.public_base_url {
            if !is_http_url(url) {
                return Err(anyhow::anyhow!("PUBLIC_BASE_URL must be an http(s) URL"));
            }
        }

        if self.storage_strategy == StorageStrategy::Commit && self.github.branch.is_empty() {
            return Err(anyhow::anyhow!(
                "GITHUB_BRANCH must not be empty when using the commit storage strategy"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.base.public_base_url.as_deref()
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.base.max_upload_size_bytes
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn storage_strategy(&self) -> StorageStrategy {
        self.storage_strategy
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            base: BaseConfig {
                server_port: 8787,
                environment: "test".to_string(),
                public_base_url: None,
                max_upload_size_bytes: 1024,
                http_concurrency_limit: 64,
            },
            github: GitHubConfig {
                api_base_url: "https://api.github.com".to_string(),
                user_agent: "Pimg-Worker".to_string(),
                request_timeout_secs: 30,
                gist_public: false,
                default_repository: None,
                branch: "main".to_string(),
                commit_path: "images".to_string(),
            },
            storage_strategy: StorageStrategy::Gist,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = test_config();
        config.github.api_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.base.public_base_url = Some("example.com".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_limits() {
        let mut config = test_config();
        config.base.server_port = 0;
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.base.max_upload_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn commit_strategy_needs_branch() {
        let mut config = test_config();
        config.storage_strategy = StorageStrategy::Commit;
        config.github.branch = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unparseable_values_are_errors() {
        assert_eq!(parse_value::<u16>("PORT", "8080").unwrap(), 8080);
        let err = parse_value::<u16>("PORT", "abc").unwrap_err();
        assert!(err.to_string().starts_with("PORT has invalid value \"abc\""));
        assert!(parse_value::<u16>("PORT", "70000").is_err());
        assert!(parse_value::<bool>("GIST_PUBLIC", "yes").is_err());
    }

    #[test]
    fn upload_size_conversion_checks_overflow() {
        assert_eq!(megabytes_to_bytes(10).unwrap(), 10 * 1024 * 1024);
        assert!(megabytes_to_bytes(usize::MAX).is_err());
    }

    #[test]
    fn production_detection() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.base.environment = "Prod".to_string();
        assert!(config.is_production());
    }
}
