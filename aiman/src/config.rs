//! Client settings, e.g. read from environment variables.

use crate::errors::ConfigError;
use crate::types::{HostUrl, Username};
use serde::Deserialize;
use std::time::Duration;

/// Time limit of a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(200);

/// How a client authenticates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    Password {
        username: Username,
        password: String,
    },
    Token {
        token: String,
        /// Unix timestamp after which the token is no longer valid.
        #[serde(default)]
        expires_on: Option<i64>,
        #[serde(default)]
        refresh_token: Option<String>,
    },
}

/// Everything needed to connect an [crate::AimanClient].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    pub host: HostUrl,
    pub auth: AuthConfig,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh: bool,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_auto_refresh() -> bool {
    true
}

const HOST: &str = "AIMAN_HOST";
const USERNAME: &str = "AIMAN_USERNAME";
const PASSWORD: &str = "AIMAN_PASSWORD";
const TOKEN: &str = "AIMAN_TOKEN";
const TOKEN_EXPIRES_ON: &str = "AIMAN_TOKEN_EXPIRES_ON";
const REFRESH_TOKEN: &str = "AIMAN_REFRESH_TOKEN";
const TIMEOUT_SECS: &str = "AIMAN_TIMEOUT_SECS";
const AUTO_REFRESH: &str = "AIMAN_AUTO_REFRESH";

impl ClientConfig {
    /// Read configuration from `AIMAN_*` environment variables.
    ///
    /// `AIMAN_HOST` is required, as well as either `AIMAN_USERNAME` and
    /// `AIMAN_PASSWORD`, or `AIMAN_TOKEN`. A username and password are
    /// preferred when both are given.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [ClientConfig::from_env], with variables looked up by `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let host = HostUrl::new(get(HOST).ok_or(ConfigError::Missing(HOST))?)?;
        let auth = match (get(USERNAME), get(PASSWORD), get(TOKEN)) {
            (Some(username), Some(password), _) => AuthConfig::Password {
                username: Username::new(username),
                password,
            },
            (_, _, Some(token)) => AuthConfig::Token {
                token,
                expires_on: get(TOKEN_EXPIRES_ON)
                    .map(|v| parse(TOKEN_EXPIRES_ON, v))
                    .transpose()?,
                refresh_token: get(REFRESH_TOKEN),
            },
            (Some(_), None, None) => return Err(ConfigError::Missing(PASSWORD)),
            _ => return Err(ConfigError::Missing(TOKEN)),
        };
        let timeout_secs = get(TIMEOUT_SECS)
            .map(|v| parse(TIMEOUT_SECS, v))
            .transpose()?
            .unwrap_or_else(default_timeout_secs);
        let auto_refresh = get(AUTO_REFRESH)
            .map(|v| parse(AUTO_REFRESH, v))
            .transpose()?
            .unwrap_or_else(default_auto_refresh);
        Ok(Self {
            host,
            auth,
            timeout_secs,
            auto_refresh,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_password_config() {
        let config = ClientConfig::from_vars(vars(&[
            ("AIMAN_HOST", "https://aiman.example.com"),
            ("AIMAN_USERNAME", "someone"),
            ("AIMAN_PASSWORD", "secret"),
            ("AIMAN_TOKEN", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.host.as_str(), "https://aiman.example.com");
        assert_eq!(
            config.auth,
            AuthConfig::Password {
                username: Username::from("someone"),
                password: "secret".to_string()
            }
        );
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.auto_refresh);
    }

    #[test]
    fn test_token_config() {
        let config = ClientConfig::from_vars(vars(&[
            ("AIMAN_HOST", "http://localhost:8080"),
            ("AIMAN_TOKEN", "t0k3n"),
            ("AIMAN_TOKEN_EXPIRES_ON", "1700000000"),
            ("AIMAN_TIMEOUT_SECS", "5"),
            ("AIMAN_AUTO_REFRESH", "false"),
        ]))
        .unwrap();
        assert_eq!(
            config.auth,
            AuthConfig::Token {
                token: "t0k3n".to_string(),
                expires_on: Some(1700000000),
                refresh_token: None
            }
        );
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(!config.auto_refresh);
    }

    #[rstest]
    #[case(&[("AIMAN_TOKEN", "t")], "AIMAN_HOST")]
    #[case(&[("AIMAN_HOST", "http://localhost")], "AIMAN_TOKEN")]
    #[case(&[("AIMAN_HOST", "http://localhost"), ("AIMAN_USERNAME", "u")], "AIMAN_PASSWORD")]
    fn test_missing(#[case] pairs: &[(&str, &str)], #[case] expected: &str) {
        match ClientConfig::from_vars(vars(pairs)) {
            Err(ConfigError::Missing(name)) => assert_eq!(name, expected),
            other => panic!("expected {} to be missing, got {:?}", expected, other),
        }
    }

    #[rstest]
    #[case("AIMAN_TIMEOUT_SECS", "soon")]
    #[case("AIMAN_AUTO_REFRESH", "sometimes")]
    #[case("AIMAN_TOKEN_EXPIRES_ON", "tomorrow")]
    fn test_invalid(#[case] name: &str, #[case] value: &str) {
        let result = ClientConfig::from_vars(vars(&[
            ("AIMAN_HOST", "http://localhost"),
            ("AIMAN_TOKEN", "t"),
            (name, value),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })))
    }

    #[test]
    fn test_bad_host() {
        let result = ClientConfig::from_vars(vars(&[
            ("AIMAN_HOST", "localhost"),
            ("AIMAN_TOKEN", "t"),
        ]));
        assert!(matches!(result, Err(ConfigError::Host(_))))
    }

    #[test]
    fn test_deserialize() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "host": "http://localhost:8080",
            "auth": {"type": "token", "token": "t"}
        }))
        .unwrap();
        assert_eq!(config.timeout_secs, 200);
        assert!(config.auto_refresh);
    }
}
