//! Revalidation configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable holding the shared secret.
pub const ENV_SECRET: &str = "REVALIDATE_SECRET";
/// Environment variable holding the endpoint URL.
pub const ENV_ENDPOINT: &str = "REVALIDATE_URL";
/// Route namespace prefixed to every slug.
pub const DEFAULT_ROUTE_PREFIX: &str = "/articles/";
/// Upper bound for one outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared secret compared by the receiving endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, for the request body only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Explicitly configured values, e.g. the `[revalidate]` table of a config file.
///
/// Anything left unset falls back to the environment or the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevalidateSettings {
    /// Shared secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Route prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_prefix: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Resolved, immutable dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevalidateConfig {
    /// Shared secret; `None` disables dispatching.
    pub secret: Option<Secret>,
    /// Endpoint URL; `None` disables dispatching.
    pub endpoint: Option<String>,
    /// Prefix prepended to the slug.
    pub route_prefix: String,
    /// Timeout for the outbound request.
    pub timeout: Duration,
}

impl Default for RevalidateConfig {
    fn default() -> Self {
        Self {
            secret: None,
            endpoint: None,
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RevalidateConfig {
    /// Create a disabled config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shared secret. Empty values disable dispatching.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = non_empty(Some(secret.into())).map(Secret::new);
        self
    }

    /// Set the endpoint URL. Empty values disable dispatching.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = non_empty(Some(endpoint.into()));
        self
    }

    /// Set the route prefix.
    pub fn with_route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = prefix.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve from explicit settings, falling back to `lookup` for the
    /// secret and endpoint.
    pub fn resolve<F>(settings: &RevalidateSettings, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = non_empty(settings.secret.clone()).or_else(|| non_empty(lookup(ENV_SECRET)));
        let endpoint =
            non_empty(settings.endpoint.clone()).or_else(|| non_empty(lookup(ENV_ENDPOINT)));

        Self {
            secret: secret.map(Secret::new),
            endpoint,
            route_prefix: settings
                .route_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_ROUTE_PREFIX.to_string()),
            timeout: settings
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// Resolve from settings and the process environment.
    pub fn from_settings(settings: &RevalidateSettings) -> Self {
        Self::resolve(settings, |key| std::env::var(key).ok())
    }

    /// Resolve from the process environment only.
    pub fn from_env() -> Self {
        Self::from_settings(&RevalidateSettings::default())
    }

    /// Secret and endpoint, if both are present.
    pub fn target(&self) -> Option<(&Secret, &str)> {
        match (&self.secret, &self.endpoint) {
            (Some(secret), Some(endpoint)) => Some((secret, endpoint.as_str())),
            _ => None,
        }
    }

    /// Whether dispatching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.target().is_some()
    }
}

/// Only the empty string counts as absent; whitespace is kept as given.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_default_is_disabled() {
        let config = RevalidateConfig::default();
        assert!(!config.is_enabled());
        assert_eq!(config.route_prefix, "/articles/");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_resolve_from_env() {
        let config = RevalidateConfig::resolve(
            &RevalidateSettings::default(),
            env(&[(ENV_SECRET, "S"), (ENV_ENDPOINT, "https://e/revalidate")]),
        );
        let (secret, endpoint) = config.target().unwrap();
        assert_eq!(secret.expose(), "S");
        assert_eq!(endpoint, "https://e/revalidate");
    }

    #[test]
    fn test_explicit_settings_win_over_env() {
        let settings = RevalidateSettings {
            secret: Some("from-file".to_string()),
            ..Default::default()
        };
        let config = RevalidateConfig::resolve(
            &settings,
            env(&[(ENV_SECRET, "from-env"), (ENV_ENDPOINT, "https://e")]),
        );
        assert_eq!(config.secret, Some(Secret::new("from-file")));
        assert_eq!(config.endpoint.as_deref(), Some("https://e"));
    }

    #[test]
    fn test_empty_values_disable() {
        let settings = RevalidateSettings {
            secret: Some(String::new()),
            endpoint: Some("https://e".to_string()),
            ..Default::default()
        };
        let config = RevalidateConfig::resolve(&settings, env(&[(ENV_SECRET, "")]));
        assert!(!config.is_enabled());

        assert!(!RevalidateConfig::new().with_secret("").with_endpoint("https://e").is_enabled());
    }

    #[test]
    fn test_whitespace_values_are_present() {
        let settings = RevalidateSettings {
            secret: Some(String::new()),
            endpoint: Some("https://e".to_string()),
            ..Default::default()
        };
        let config = RevalidateConfig::resolve(&settings, env(&[(ENV_SECRET, " ")]));
        assert!(config.is_enabled());
        assert_eq!(config.secret, Some(Secret::new(" ")));

        assert!(RevalidateConfig::new().with_secret(" ").with_endpoint("https://e").is_enabled());
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let settings = RevalidateSettings {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let config = RevalidateConfig::resolve(&settings, env(&[]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_settings_from_toml() {
        let settings: RevalidateSettings = toml::from_str(
            "endpoint = \"https://e\"\nroute_prefix = \"/posts/\"\ntimeout_secs = 2",
        )
        .unwrap();
        let config = RevalidateConfig::resolve(&settings, env(&[]));

        assert_eq!(config.route_prefix, "/posts/");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        assert_eq!(format!("{:?}", Secret::new("hunter2")), "Secret(***)");
    }
}
