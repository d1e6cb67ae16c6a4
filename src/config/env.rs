//! Secrets and upstream settings taken from the process environment.
//!
//! These are re-read on every call so a rotated key takes effect without a
//! restart. Empty variables count as unset.

use std::sync::Arc;

pub const GATEWAY_API_KEY: &str = "GATEWAY_API_KEY";
pub const UPSTREAM_BASE: &str = "UPSTREAM_BASE";
pub const UPSTREAM_KEY: &str = "UPSTREAM_KEY";
pub const MODEL: &str = "MODEL";

pub const DEFAULT_UPSTREAM_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Where to reach the completion service and with which credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl UpstreamConfig {
    /// `{base_url}/chat/completions`, tolerating a trailing slash on the base.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Snapshot of every environment-derived setting one call needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewaySettings {
    /// Shared secret expected in `x-api-key`.
    pub gateway_key: Option<String>,
    pub upstream: UpstreamConfig,
}

impl GatewaySettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            gateway_key: get(GATEWAY_API_KEY),
            upstream: UpstreamConfig {
                base_url: get(UPSTREAM_BASE).unwrap_or_else(|| DEFAULT_UPSTREAM_BASE.to_string()),
                api_key: get(UPSTREAM_KEY),
                model: get(MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
        }
    }
}

/// How the handler obtains its settings.
#[derive(Debug, Clone)]
pub enum SettingsSource {
    /// Read the process environment on every call.
    Environment,
    /// A pinned snapshot, for embedders and tests.
    Fixed(Arc<GatewaySettings>),
}

impl SettingsSource {
    pub fn fixed(settings: GatewaySettings) -> Self {
        SettingsSource::Fixed(Arc::new(settings))
    }

    pub fn load(&self) -> Arc<GatewaySettings> {
        match self {
            SettingsSource::Environment => Arc::new(GatewaySettings::from_env()),
            SettingsSource::Fixed(settings) => Arc::clone(settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> GatewaySettings {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewaySettings::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = lookup(&[]);
        assert_eq!(settings.gateway_key, None);
        assert_eq!(settings.upstream.base_url, "https://api.openai.com/v1");
        assert_eq!(settings.upstream.model, "gpt-3.5-turbo");
        assert_eq!(settings.upstream.api_key, None);
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let settings = lookup(&[(GATEWAY_API_KEY, ""), (MODEL, ""), (UPSTREAM_KEY, "")]);
        assert_eq!(settings.gateway_key, None);
        assert_eq!(settings.upstream.api_key, None);
        assert_eq!(settings.upstream.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_overrides() {
        let settings = lookup(&[
            (GATEWAY_API_KEY, "gw"),
            (UPSTREAM_BASE, "http://localhost:11434/v1"),
            (UPSTREAM_KEY, "sk-test"),
            (MODEL, "llama3"),
        ]);
        assert_eq!(settings.gateway_key.as_deref(), Some("gw"));
        assert_eq!(settings.upstream.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.upstream.model, "llama3");
        assert_eq!(
            settings.upstream.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let config = UpstreamConfig {
            base_url: "https://api.example.com/v1/".into(),
            ..Default::default()
        };
        assert_eq!(config.completions_url(), "https://api.example.com/v1/chat/completions");
    }

    #[test]
    fn test_fixed_source_returns_snapshot() {
        let source = SettingsSource::fixed(lookup(&[(GATEWAY_API_KEY, "k")]));
        assert_eq!(source.load().gateway_key.as_deref(), Some("k"));
    }
}
