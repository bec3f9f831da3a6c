//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::FunctionAppConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_ENDPOINT_URL: &str = "UPSTREAM_ENDPOINT_URL";
pub const ENV_SUBSCRIPTION_KEY: &str = "UPSTREAM_SUBSCRIPTION_KEY";
pub const ENV_LEGACY_ENDPOINT_URL: &str = "APIM_ENDPOINT_URL";
pub const ENV_LEGACY_SUBSCRIPTION_KEY: &str = "APIM_SUBSCRIPTION_KEY";
/// Port assigned by the function host to a custom handler.
pub const ENV_HANDLER_PORT: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {name} '{value}': not a port number")]
    InvalidPort { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<FunctionAppConfig, ConfigError> {
    let config = match path {
        Some(path) => parse_file(path)?,
        None => FunctionAppConfig::default(),
    };

    let config = apply_env_overrides(config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<FunctionAppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment values on top of a file configuration.
///
/// `lookup` is `std::env::var` in production; tests pass a map.
pub fn apply_env_overrides<F>(
    mut config: FunctionAppConfig,
    lookup: F,
) -> Result<FunctionAppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let first_set = |primary: &str, legacy: &str| {
        lookup(primary)
            .filter(|v| !v.is_empty())
            .or_else(|| lookup(legacy).filter(|v| !v.is_empty()))
    };

    if let Some(url) = first_set(ENV_ENDPOINT_URL, ENV_LEGACY_ENDPOINT_URL) {
        config.upstream.endpoint_url = Some(url);
    }
    if let Some(key) = first_set(ENV_SUBSCRIPTION_KEY, ENV_LEGACY_SUBSCRIPTION_KEY) {
        config.upstream.subscription_key = Some(key);
    }

    if let Some(port) = lookup(ENV_HANDLER_PORT).filter(|v| !v.is_empty()) {
        let port: u16 = port.trim().parse().map_err(|_| ConfigError::InvalidPort {
            name: ENV_HANDLER_PORT,
            value: port.clone(),
        })?;
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = FunctionAppConfig::default();
        config.upstream.endpoint_url = Some("https://file.example.com".into());

        let config = apply_env_overrides(
            config,
            env(&[
                (ENV_ENDPOINT_URL, "https://env.example.com/saludo"),
                (ENV_SUBSCRIPTION_KEY, "k-123"),
            ]),
        )
        .unwrap();

        assert_eq!(
            config.upstream.endpoint_url.as_deref(),
            Some("https://env.example.com/saludo")
        );
        assert_eq!(config.upstream.subscription_key.as_deref(), Some("k-123"));
    }

    #[test]
    fn test_legacy_names_used_as_fallback() {
        let config = apply_env_overrides(
            FunctionAppConfig::default(),
            env(&[
                (ENV_LEGACY_ENDPOINT_URL, "https://apim.example.com"),
                (ENV_SUBSCRIPTION_KEY, ""),
                (ENV_LEGACY_SUBSCRIPTION_KEY, "legacy-key"),
            ]),
        )
        .unwrap();

        assert_eq!(
            config.upstream.endpoint_url.as_deref(),
            Some("https://apim.example.com")
        );
        assert_eq!(config.upstream.subscription_key.as_deref(), Some("legacy-key"));
    }

    #[test]
    fn test_handler_port_overrides_bind_address() {
        let config =
            apply_env_overrides(FunctionAppConfig::default(), env(&[(ENV_HANDLER_PORT, "3000")]))
                .unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");

        let err = apply_env_overrides(FunctionAppConfig::default(), env(&[(ENV_HANDLER_PORT, "x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn test_parse_file_and_reject_invalid() {
        let dir = std::env::temp_dir().join(format!("saludo-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.toml");
        let mut f = fs::File::create(&good).unwrap();
        writeln!(f, "[upstream]\nendpoint_url = \"https://api.example.com/saludo\"").unwrap();
        let config = parse_file(&good).unwrap();
        assert_eq!(
            config.upstream.endpoint_url.as_deref(),
            Some("https://api.example.com/saludo")
        );

        let bad = dir.join("bad.toml");
        fs::write(&bad, "[timeouts]\nrequest_secs = \"soon\"").unwrap();
        assert!(matches!(parse_file(&bad), Err(ConfigError::Parse(_))));

        assert!(matches!(
            parse_file(&dir.join("missing.toml")),
            Err(ConfigError::Io(_))
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::ZeroTimeout,
            ValidationError::UnknownLogLevel("loud".into()),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: timeouts.request_secs must be greater than zero, unknown log level 'loud'"
        );
    }
}
