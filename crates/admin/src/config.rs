//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PMS_BASE_URL` - Backend base URL (`https://` is assumed when no scheme is given)
//! - `PMS_API_TOKEN` - Bearer token sent with every request
//!
//! ## Optional
//! - `PMS_EMPLOYEE_TYPE` - `employee_type` sent with hierarchy lookups (default: external)
//! - `PMS_REQUEST_TIMEOUT_SECS` - HTTP timeout in seconds (default: 30)
//! - `PMS_REASSIGN_PATH` - Route of the reportee reassignment screen
//!   (default: /safety/m-safe/reportees-reassign)
//! - `PMS_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_EMPLOYEE_TYPE: &str = "external";
const DEFAULT_TIMEOUT_SECS: &str = "30";
const DEFAULT_REASSIGN_PATH: &str = "/safety/m-safe/reportees-reassign";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
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

/// Admin tool configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct AdminConfig {
    /// Backend base URL, scheme included
    pub base_url: Url,
    /// Bearer token
    pub api_token: SecretString,
    /// `employee_type` query value for hierarchy lookups
    pub employee_type: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// Route of the reassignment screen
    pub reassign_path: String,
    /// Emit JSON logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"[REDACTED]")
            .field("employee_type", &self.employee_type)
            .field("request_timeout", &self.request_timeout)
            .field("reassign_path", &self.reassign_path)
            .field("log_json", &self.log_json)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[SET]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish_non_exhaustive()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let base_url = parse_base_url(&env.required("PMS_BASE_URL")?)?;

        let api_token = env.required("PMS_API_TOKEN")?;
        // Tokens are issued by the backend; only warn about weak-looking ones.
        if let Err(e) = validate_secret_strength(&api_token, "PMS_API_TOKEN") {
            tracing::warn!("PMS_API_TOKEN validation warning: {e}");
        }

        let timeout_secs = env
            .or_default("PMS_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PMS_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        let reassign_path = env.or_default("PMS_REASSIGN_PATH", DEFAULT_REASSIGN_PATH);
        if !reassign_path.starts_with('/') {
            return Err(ConfigError::InvalidEnvVar(
                "PMS_REASSIGN_PATH".to_string(),
                "must start with '/'".to_string(),
            ));
        }

        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            base_url,
            api_token: SecretString::from(api_token),
            employee_type: env.or_default("PMS_EMPLOYEE_TYPE", DEFAULT_EMPLOYEE_TYPE),
            request_timeout: Duration::from_secs(timeout_secs),
            reassign_path,
            log_json: env.optional("PMS_LOG_JSON").is_some(),
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Minimal configuration for a given backend, used by tests and tools
    /// that already hold a token.
    #[must_use]
    pub fn new(base_url: Url, api_token: SecretString) -> Self {
        Self {
            base_url,
            api_token,
            employee_type: DEFAULT_EMPLOYEE_TYPE.to_string(),
            request_timeout: Duration::from_secs(30),
            reassign_path: DEFAULT_REASSIGN_PATH.to_string(),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }

    /// Full URL for an API path such as `/pms/users/x.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL does not parse.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_token.expose_secret())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Accept `host`, `host/prefix`, `http(s)://host...`; default to https.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("PMS_BASE_URL".to_string(), reason);

    let raw = raw.trim();
    let authority = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    if authority.is_empty() || authority.starts_with('/') {
        return Err(invalid("missing host".to_string()));
    }

    let raw = raw.trim_end_matches('/');
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| invalid(e.to_string()))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
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

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn env_key(err: &ConfigError) -> &str {
        match err {
            ConfigError::MissingEnvVar(key)
            | ConfigError::InvalidEnvVar(key, _)
            | ConfigError::InsecureSecret(key, _) => key,
        }
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = AdminConfig::from_lookup(lookup(&[
            ("PMS_BASE_URL", "fm-uat-api.example.net"),
            ("PMS_API_TOKEN", "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "https://fm-uat-api.example.net/");
        assert_eq!(config.employee_type, "external");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.reassign_path, "/safety/m-safe/reportees-reassign");
        assert!(!config.log_json);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_required() {
        let vars = lookup(&[("PMS_BASE_URL", "api.test")]);
        let err = AdminConfig::from_lookup(vars).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        assert_eq!(env_key(&err), "PMS_API_TOKEN");

        let err = AdminConfig::from_lookup(lookup(&[("PMS_API_TOKEN", "t")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        assert_eq!(env_key(&err), "PMS_BASE_URL");
    }

    #[test]
    fn test_blank_token_rejected() {
        let err = AdminConfig::from_lookup(lookup(&[
            ("PMS_BASE_URL", "api.test"),
            ("PMS_API_TOKEN", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = AdminConfig::from_lookup(lookup(&[
            ("PMS_BASE_URL", "api.test"),
            ("PMS_API_TOKEN", "token"),
            ("PMS_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));
        assert_eq!(env_key(&err), "PMS_REQUEST_TIMEOUT_SECS");
    }

    #[test]
    fn test_reassign_path_must_be_absolute() {
        let err = AdminConfig::from_lookup(lookup(&[
            ("PMS_BASE_URL", "api.test"),
            ("PMS_API_TOKEN", "token"),
            ("PMS_REASSIGN_PATH", "reassign"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));
        assert_eq!(env_key(&err), "PMS_REASSIGN_PATH");
    }

    #[test]
    fn test_parse_base_url_keeps_scheme_and_prefix() {
        let url = parse_base_url("http://127.0.0.1:8080/api/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api");

        let url = parse_base_url(" api.test/ ").unwrap();
        assert_eq!(url.as_str(), "https://api.test/");
    }

    #[test]
    fn test_parse_base_url_rejects_missing_host() {
        for raw in ["", "   ", "https://", "https:///", "http:///api", "/api"] {
            let err = parse_base_url(raw).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvVar(..)), "{raw:?}");
            assert_eq!(env_key(&err), "PMS_BASE_URL");
        }
    }

    #[test]
    fn test_endpoint_joins_under_prefix() {
        let config = AdminConfig::new(
            Url::parse("http://127.0.0.1:8080/api").unwrap(),
            SecretString::from("t"),
        );
        let url = config.endpoint("/pms/users/vi_user_hierarchy.json").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/api/pms/users/vi_user_hierarchy.json"
        );

        let config = AdminConfig::new(
            Url::parse("https://api.test/").unwrap(),
            SecretString::from("t"),
        );
        assert_eq!(
            config.endpoint("pms/users/x.json").unwrap().as_str(),
            "https://api.test/pms/users/x.json"
        );
    }

    #[test]
    fn test_auth_header() {
        let config = AdminConfig::new(
            Url::parse("https://api.test").unwrap(),
            SecretString::from("abc123"),
        );
        assert_eq!(config.auth_header(), "Bearer abc123");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = AdminConfig::new(
            Url::parse("https://api.test").unwrap(),
            SecretString::from("super-private-token"),
        );
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-private-token"));
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#") > 3.3);
    }

    #[test]
    fn test_validate_secret_strength() {
        assert!(matches!(
            validate_secret_strength("your-api-token-here", "T"),
            Err(ConfigError::InsecureSecret(_, _))
        ));
        let repeated = "a".repeat(33);
        assert!(validate_secret_strength(&repeated, "T").is_err());
        let strong = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6";
        assert!(validate_secret_strength(strong, "T").is_ok());
    }
}
