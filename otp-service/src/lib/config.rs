use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Signing secret used when none is configured and the fallback is allowed.
///
/// Anyone who knows this value can forge tokens.
pub const FALLBACK_JWT_SECRET: &str = "your-secret-key";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub otp: OtpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub allow_fallback_secret: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OtpConfig {
    #[serde(default = "default_challenge_ttl_seconds")]
    pub challenge_ttl_seconds: i64,
    #[serde(default = "default_access_ttl_seconds")]
    pub access_ttl_seconds: i64,
    #[serde(default)]
    pub echo_passcode: bool,
}

fn default_http_port() -> u16 {
    3000
}

fn default_challenge_ttl_seconds() -> i64 {
    5 * 60
}

fn default_access_ttl_seconds() -> i64 {
    60 * 60
}

/// Where the signing secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Configured,
    Fallback,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, OTP__ECHO_PASSCODE, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml, RUN_MODE defaults to production)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "production".to_string());

        // Example: JWT__SECRET=... overrides jwt.secret
        Self::load_from(&run_mode, Environment::default().separator("__"))
    }

    /// Load configuration for a run mode, layering the given environment source last.
    pub fn load_from(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.otp.challenge_ttl_seconds <= 0 {
            return Err(ConfigError::Message(
                "otp.challenge_ttl_seconds must be positive".to_string(),
            ));
        }
        if self.otp.access_ttl_seconds <= 0 {
            return Err(ConfigError::Message(
                "otp.access_ttl_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl JwtConfig {
    /// Resolve the signing secret.
    ///
    /// A configured, non-empty secret always wins. Without one, startup fails
    /// unless `allow_fallback_secret` is set, in which case the well-known
    /// fallback is returned.
    ///
    /// # Errors
    /// * `ConfigError::NotFound` - No secret configured and fallback not allowed
    pub fn signing_secret(&self) -> Result<(&str, SecretSource), ConfigError> {
        match self.secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => Ok((secret, SecretSource::Configured)),
            _ if self.allow_fallback_secret => Ok((FALLBACK_JWT_SECRET, SecretSource::Fallback)),
            _ => Err(ConfigError::NotFound("jwt.secret".to_string())),
        }
    }
}

impl OtpConfig {
    pub fn challenge_ttl(&self) -> Duration {
        Duration::seconds(self.challenge_ttl_seconds)
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::seconds(self.access_ttl_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
        }
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            challenge_ttl_seconds: default_challenge_ttl_seconds(),
            access_ttl_seconds: default_access_ttl_seconds(),
            echo_passcode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use config::Map;

    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Environment::default().separator("__").source(Some(source))
    }

    #[test]
    fn test_environment_overrides_are_applied() {
        let config = Config::load_from(
            "production",
            environment(&[
                ("JWT__SECRET", "env-secret-at-least-32-bytes-long!"),
                ("OTP__ECHO_PASSCODE", "true"),
                ("SERVER__HTTP_PORT", "8081"),
            ]),
        )
        .expect("Failed to load configuration");

        assert_eq!(
            config.jwt.signing_secret().unwrap(),
            ("env-secret-at-least-32-bytes-long!", SecretSource::Configured)
        );
        assert!(config.otp.echo_passcode);
        assert_eq!(config.server.http_port, 8081);
    }

    #[test]
    fn test_production_without_secret_fails() {
        let config = Config::load_from("production", environment(&[]))
            .expect("Failed to load configuration");

        assert!(!config.otp.echo_passcode);
        assert!(config.jwt.signing_secret().is_err());
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let result = Config::load_from(
            "production",
            environment(&[("OTP__CHALLENGE_TTL_SECONDS", "0")]),
        );
        assert!(result.is_err());
    }

    fn jwt_config(secret: Option<&str>, allow_fallback_secret: bool) -> JwtConfig {
        JwtConfig {
            secret: secret.map(str::to_string),
            allow_fallback_secret,
        }
    }

    #[test]
    fn test_configured_secret_wins() {
        let config = jwt_config(Some("configured-secret"), true);
        assert_eq!(
            config.signing_secret().unwrap(),
            ("configured-secret", SecretSource::Configured)
        );
    }

    #[test]
    fn test_missing_secret_is_a_startup_fault() {
        assert!(jwt_config(None, false).signing_secret().is_err());
        assert!(jwt_config(Some("   "), false).signing_secret().is_err());
    }

    #[test]
    fn test_fallback_secret_only_when_allowed() {
        assert_eq!(
            jwt_config(None, true).signing_secret().unwrap(),
            (FALLBACK_JWT_SECRET, SecretSource::Fallback)
        );
    }

    #[test]
    fn test_otp_defaults() {
        let otp = OtpConfig::default();
        assert_eq!(otp.challenge_ttl(), Duration::minutes(5));
        assert_eq!(otp.access_ttl(), Duration::hours(1));
        assert!(!otp.echo_passcode);
    }
}
