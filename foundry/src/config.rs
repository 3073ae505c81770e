//! Startup configuration layered from defaults and `FOUNDRY_*` environment variables.
//!
//! Nested keys use a double underscore, e.g. `FOUNDRY_PROVIDER__MODEL` or
//! `FOUNDRY_RETRIEVAL__BASE_URL`.
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use foundry::config::{FoundryConfig, ProviderKind};
//!
//! let env = HashMap::from([
//!     ("FOUNDRY_PROVIDER__KIND".to_string(), "ollama".to_string()),
//!     ("FOUNDRY_SERVER__PORT".to_string(), "9090".to_string()),
//! ]);
//! let config = FoundryConfig::from_env_map(env).expect("config should load");
//!
//! assert_eq!(config.provider.kind, ProviderKind::Ollama);
//! assert_eq!(config.provider.model(), "llama3.2");
//! assert_eq!(config.server.port, 9090);
//! assert_eq!(config.retrieval.top_k, 3);
//! ```

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

use config::{Config, Environment};
use fcommon::GenerationOptions;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "FOUNDRY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A required value is absent; `env_var` names what to set.
    Missing,
    Invalid,
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
    pub env_var: Option<String>,
}

impl ConfigError {
    pub fn missing(field: &str) -> Self {
        let env_var = to_env_var(field);
        Self {
            kind: ConfigErrorKind::Missing,
            message: format!("missing configuration value `{field}`; set {env_var}"),
            env_var: Some(env_var),
        }
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self {
            kind: ConfigErrorKind::Invalid,
            message: format!("invalid `{field}`: {}", message.into()),
            env_var: Some(to_env_var(field)),
        }
    }

    pub fn source(message: impl Into<String>) -> Self {
        Self {
            kind: ConfigErrorKind::Source,
            message: message.into(),
            env_var: None,
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(value: config::ConfigError) -> Self {
        if let config::ConfigError::NotFound(field) = &value {
            return ConfigError::missing(field);
        }

        let rendered = value.to_string();
        if let Some(rest) = rendered.strip_prefix("missing field `") {
            let field = rest.split('`').next().unwrap_or(rest);
            return ConfigError::missing(field);
        }

        match value {
            config::ConfigError::Type { key, .. } => {
                let field = key.unwrap_or_else(|| "<root>".to_string());
                ConfigError::invalid(&field, rendered)
            }
            _ => ConfigError::source(rendered),
        }
    }
}

/// Maps a dotted key such as `provider.api_key` to `FOUNDRY_PROVIDER__API_KEY`.
pub fn to_env_var(field: &str) -> String {
    let path = field
        .split('.')
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join("__");
    format!("{ENV_PREFIX}_{path}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Ollama,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl ProviderSettings {
    pub fn model(&self) -> &str {
        match (&self.model, self.kind) {
            (Some(model), _) if !model.trim().is_empty() => model,
            (_, ProviderKind::OpenAi) => "gpt-4o-mini",
            (_, ProviderKind::Ollama) => "llama3.2",
        }
    }

    pub fn default_options(&self) -> GenerationOptions {
        GenerationOptions::default()
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetrievalSettings {
    pub base_url: String,
    pub top_k: usize,
    pub timeout_secs: u64,
}

impl RetrievalSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchSettings {
    pub base_url: String,
    pub max_results: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|err| ConfigError::invalid("server.host", format!("{err}")))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoundryConfig {
    pub provider: ProviderSettings,
    pub retrieval: RetrievalSettings,
    pub search: SearchSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl FoundryConfig {
    /// Loads from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Loads from `vars` in place of the process environment.
    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::build(Some(vars))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn build(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("provider.kind", "openai")?
            .set_default("provider.temperature", 0.7)?
            .set_default("provider.max_tokens", 2048)?
            .set_default("provider.timeout_secs", 90)?
            .set_default("retrieval.base_url", fretrieval::DEFAULT_RETRIEVAL_BASE_URL)?
            .set_default("retrieval.top_k", 3)?
            .set_default("retrieval.timeout_secs", 10)?
            .set_default("search.base_url", ftooling::builtin::DUCKDUCKGO_BASE_URL)?
            .set_default("search.max_results", 5)?
            .set_default("search.user_agent", ftooling::builtin::DEFAULT_USER_AGENT)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        let loaded: FoundryConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.kind == ProviderKind::OpenAi
            && self
                .provider
                .api_key
                .as_deref()
                .is_none_or(|key| key.trim().is_empty())
        {
            return Err(ConfigError::missing("provider.api_key"));
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::invalid(
                "provider.temperature",
                "must be within 0.0..=2.0",
            ));
        }

        if self.provider.max_tokens == 0 {
            return Err(ConfigError::invalid(
                "provider.max_tokens",
                "must be greater than zero",
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(ConfigError::invalid(
                "retrieval.top_k",
                "must be greater than zero",
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::invalid(
                "request_timeout_secs",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_required_values_are_set() {
        let config = FoundryConfig::from_env_map(env(&[("FOUNDRY_PROVIDER__API_KEY", "sk-test")]))
            .expect("config should load");

        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert_eq!(config.provider.model(), "gpt-4o-mini");
        assert_eq!(config.provider.temperature, 0.7);
        assert_eq!(config.provider.max_tokens, 2048);
        assert_eq!(config.provider.timeout(), Duration::from_secs(90));
        assert_eq!(config.retrieval.base_url, "http://localhost:8000");
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.timeout(), Duration::from_secs(10));
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = FoundryConfig::from_env_map(env(&[
            ("FOUNDRY_PROVIDER__KIND", "ollama"),
            ("FOUNDRY_PROVIDER__MODEL", "mistral"),
            ("FOUNDRY_PROVIDER__TEMPERATURE", "0.2"),
            ("FOUNDRY_RETRIEVAL__BASE_URL", "http://chroma:8000"),
            ("FOUNDRY_RETRIEVAL__TOP_K", "5"),
            ("FOUNDRY_REQUEST_TIMEOUT_SECS", "30"),
            ("FOUNDRY_SERVER__HOST", "127.0.0.1"),
        ]))
        .expect("config should load");

        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert_eq!(config.provider.model(), "mistral");
        assert_eq!(config.provider.temperature, 0.2);
        assert_eq!(config.retrieval.base_url, "http://chroma:8000");
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(
            config
                .server
                .socket_addr()
                .expect("address should parse")
                .to_string(),
            "127.0.0.1:8080"
        );
    }

    #[test]
    fn openai_without_key_names_the_variable_to_set() {
        let error = FoundryConfig::from_env_map(HashMap::new()).expect_err("key is required");

        assert_eq!(error.kind, ConfigErrorKind::Missing);
        assert_eq!(error.env_var.as_deref(), Some("FOUNDRY_PROVIDER__API_KEY"));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let error = FoundryConfig::from_env_map(env(&[
            ("FOUNDRY_PROVIDER__KIND", "ollama"),
            ("FOUNDRY_PROVIDER__TEMPERATURE", "3.5"),
        ]))
        .expect_err("temperature should be rejected");
        assert_eq!(error.kind, ConfigErrorKind::Invalid);
        assert_eq!(error.env_var.as_deref(), Some("FOUNDRY_PROVIDER__TEMPERATURE"));

        let error = FoundryConfig::from_env_map(env(&[
            ("FOUNDRY_PROVIDER__KIND", "ollama"),
            ("FOUNDRY_RETRIEVAL__TOP_K", "0"),
        ]))
        .expect_err("top_k should be rejected");
        assert_eq!(error.env_var.as_deref(), Some("FOUNDRY_RETRIEVAL__TOP_K"));
    }

    #[test]
    fn env_var_names_follow_prefix_and_separator() {
        assert_eq!(to_env_var("provider.api_key"), "FOUNDRY_PROVIDER__API_KEY");
        assert_eq!(to_env_var("request_timeout_secs"), "FOUNDRY_REQUEST_TIMEOUT_SECS");
    }
}
