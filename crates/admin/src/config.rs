//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKROOM_API_URL` - Base URL of the store's backend proxy
//!   (e.g., `https://proxy.example.com/wp-json/wc/v3/`)
//! - `BACKROOM_API_TOKEN` - Bearer token for the proxy (high privilege:
//!   full catalog write access)
//!
//! ## Optional
//! - `BACKROOM_ENV` - `development` or `production` (default: `development`);
//!   controls how much error detail is shown to users
//! - `BACKROOM_TIMEOUT_SECS` - Default per-request timeout (default: 30).
//!   Media uploads use their own extended timeout.

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Deployment environment; gates how much error detail reaches users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// True when raw error detail may be shown to the user.
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!("invalid environment: {s}")),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Store API (proxy) configuration.
    pub store: StoreApiConfig,
    /// Deployment environment.
    pub environment: Environment,
}

/// Store API configuration.
///
/// Implements `Debug` manually to redact the bearer token, which has full
/// catalog write access.
#[derive(Clone)]
pub struct StoreApiConfig {
    /// Proxy base URL; always ends with `/` so endpoint paths join cleanly.
    pub base_url: Url,
    /// Bearer token for the proxy.
    pub token: SecretString,
    /// Default per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for StoreApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store = StoreApiConfig::from_env()?;
        let environment = get_env_or_default("BACKROOM_ENV", "development")
            .parse::<Environment>()
            .map_err(|e| ConfigError::InvalidEnvVar("BACKROOM_ENV".to_string(), e))?;

        Ok(Self { store, environment })
    }
}

impl StoreApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("BACKROOM_API_URL")?;
        let base_url = parse_base_url(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("BACKROOM_API_URL".to_string(), e))?;

        let token = get_validated_secret("BACKROOM_API_TOKEN")?;

        let timeout_secs = get_env_or_default(
            "BACKROOM_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar("BACKROOM_TIMEOUT_SECS".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse and normalize the proxy base URL.
///
/// `Url::join` replaces the last path segment unless the base ends with a
/// slash, so one is appended if missing.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|e| e.to_string())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real tokens have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated token."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        // Random-looking string should have high entropy
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-token-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://proxy.example.com/wp-json/wc/v3").unwrap();
        assert_eq!(url.as_str(), "https://proxy.example.com/wp-json/wc/v3/");
    }

    #[test]
    fn test_parse_base_url_keeps_existing_slash() {
        let url = parse_base_url("https://proxy.example.com/wp-json/wc/v3/").unwrap();
        assert_eq!(url.as_str(), "https://proxy.example.com/wp-json/wc/v3/");
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!("development".parse::<Environment>().unwrap().is_development());
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_store_config_debug_redacts_token() {
        let config = StoreApiConfig {
            base_url: Url::parse("https://proxy.example.com/wp-json/wc/v3/").unwrap(),
            token: SecretString::from("k9$Xp2!mQ7@vL4#zW8&nB1*"),
            timeout: Duration::from_secs(30),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("proxy.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("k9$Xp2"));
    }
}
