use std::env;
use std::time::Duration;

use log::LevelFilter;

/// Base URL of the game server when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:80";

/// Path of the single game endpoint.
pub const DEFAULT_API_PATH: &str = "/api/";

/// Default timeout for one request/response exchange (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach the game API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_path: String,
    pub timeout: Duration,
    pub log_level: LevelFilter,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
            log_level: LevelFilter::Info,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TTT_API_URL` - server base URL (default: `http://127.0.0.1:80`)
    /// - `TTT_API_PATH` - endpoint path (default: `/api/`)
    /// - `TTT_TIMEOUT_SECS` - request timeout in seconds (default: 30, minimum 1)
    /// - `TTT_LOG` - log level (default: `info`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("TTT_API_URL") {
            config.base_url = url;
        }
        if let Some(path) = lookup("TTT_API_PATH") {
            config.api_path = path;
        }
        if let Some(secs) = parse::<u64>(lookup("TTT_TIMEOUT_SECS")) {
            config.timeout = timeout_from_secs(secs);
        }
        if let Some(level) = parse::<LevelFilter>(lookup("TTT_LOG")) {
            config.log_level = level;
        }

        config
    }

    /// Apply command-line flags on top of this configuration.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        api_path: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(path) = api_path {
            self.api_path = path;
        }
        if let Some(secs) = timeout_secs {
            self.timeout = timeout_from_secs(secs);
        }
        self
    }

    /// Full URL of the game endpoint.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.api_path.starts_with('/') {
            format!("{}{}", base, self.api_path)
        } else {
            format!("{}/{}", base, self.api_path)
        }
    }
}

fn timeout_from_secs(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}

fn parse<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let mut config = ClientConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.endpoint(), "http://localhost:5000/api/");

        config.api_path = "api/".to_string();
        assert_eq!(config.endpoint(), "http://localhost:5000/api/");
    }

    #[test]
    fn default_points_at_local_server() {
        assert_eq!(ClientConfig::default().endpoint(), "http://127.0.0.1:80/api/");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TTT_API_URL", "http://env.test"),
            ("TTT_TIMEOUT_SECS", "5"),
            ("TTT_LOG", "debug"),
        ]));
        assert_eq!(config.base_url, "http://env.test");
        assert_eq!(config.api_path, DEFAULT_API_PATH);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn unparsable_environment_keeps_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TTT_TIMEOUT_SECS", "soon"),
            ("TTT_LOG", "loud"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn flags_override_environment() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TTT_API_URL", "http://env.test"),
            ("TTT_API_PATH", "/env/"),
            ("TTT_TIMEOUT_SECS", "5"),
        ]))
        .with_overrides(Some("http://flag.test".to_string()), None, Some(9));

        assert_eq!(config.base_url, "http://flag.test");
        assert_eq!(config.api_path, "/env/");
        assert_eq!(config.timeout, Duration::from_secs(9));
        assert_eq!(config.endpoint(), "http://flag.test/env/");
    }

    #[test]
    fn zero_timeout_is_raised_to_one_second() {
        let from_env = ClientConfig::from_lookup(lookup(&[("TTT_TIMEOUT_SECS", "0")]));
        assert_eq!(from_env.timeout, Duration::from_secs(1));

        let from_flag = ClientConfig::default().with_overrides(None, None, Some(0));
        assert_eq!(from_flag.timeout, Duration::from_secs(1));
    }
}
