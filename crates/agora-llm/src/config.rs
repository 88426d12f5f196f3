//! Configuration management for Agora
//!
//! Handles the model catalog, credential checks, and runtime settings read
//! from the environment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::Arc;

use crate::mock::MockModel;
use crate::provider::{CompletionModel, LlmError, ModelProvider};

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
    #[error("Unknown model: {0}")]
    UnknownModel(String),
}

/// Configuration for one selectable model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Catalog key (e.g. `openai-gpt4o`)
    pub name: String,
    /// Human-readable name
    pub display_name: String,
    /// Backend family (`openai`, `gemini`, `mock`, ...)
    pub provider: String,
    /// Identifier sent to the backend
    pub model_id: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Env var holding the API key (`None` = no key needed)
    pub api_key_env: Option<String>,
    /// Whether tool binding is supported
    pub supports_tools: bool,
}

impl ModelSpec {
    fn new(name: &str, display_name: &str, provider: &str, model_id: &str, api_key_env: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            provider: provider.to_string(),
            model_id: model_id.to_string(),
            temperature: 0.7,
            api_key_env: api_key_env.map(str::to_string),
            supports_tools: true,
        }
    }
}

/// Credential status of one model
#[derive(Debug, Clone, Serialize)]
pub struct ModelAvailability {
    pub name: String,
    pub display_name: String,
    pub provider: String,
    pub available: bool,
    pub status: String,
}

/// Builds a model for a spec; registered per provider
pub type BackendFactory =
    Arc<dyn Fn(&ModelSpec) -> Result<Arc<dyn CompletionModel>, LlmError> + Send + Sync>;

/// Name of the built-in offline backend
pub const MOCK_PROVIDER: &str = "mock";

/// The table of selectable models and the backends that can build them.
///
/// Network clients are plugged in with [`ModelCatalog::register_backend`];
/// only the `mock` backend is built in.
#[derive(Clone)]
pub struct ModelCatalog {
    specs: Vec<ModelSpec>,
    backends: HashMap<String, BackendFactory>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        let specs = vec![
            ModelSpec::new("openai-gpt4o", "OpenAI GPT-4o", "openai", "gpt-4o", Some("OPENAI_API_KEY")),
            ModelSpec::new(
                "openai-gpt4o-mini",
                "OpenAI GPT-4o Mini",
                "openai",
                "gpt-4o-mini",
                Some("OPENAI_API_KEY"),
            ),
            ModelSpec::new(
                "gemini-pro",
                "Google Gemini 1.5 Pro",
                "gemini",
                "gemini-1.5-pro",
                Some("GOOGLE_API_KEY"),
            ),
            ModelSpec::new(
                "gemini-flash",
                "Google Gemini 1.5 Flash",
                "gemini",
                "gemini-1.5-flash",
                Some("GOOGLE_API_KEY"),
            ),
            ModelSpec::new("mock", "Offline Mock", MOCK_PROVIDER, "smart-mock", None),
        ];

        let mut catalog = Self {
            specs,
            backends: HashMap::new(),
        };
        catalog.register_backend(
            MOCK_PROVIDER,
            Arc::new(|spec: &ModelSpec| {
                Ok(Arc::new(MockModel::smart().with_name(spec.name.clone())) as Arc<dyn CompletionModel>)
            }),
        );
        catalog
    }
}

impl ModelCatalog {
    /// Catalog with the default model table
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a model up by catalog key or display name
    pub fn get(&self, name: &str) -> Option<&ModelSpec> {
        self.specs
            .iter()
            .find(|s| s.name == name)
            .or_else(|| self.specs.iter().find(|s| s.display_name == name))
    }

    /// Catalog keys in table order
    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.name.as_str()).collect()
    }

    /// Models belonging to one provider
    pub fn by_provider(&self, provider: &str) -> Vec<&ModelSpec> {
        self.specs.iter().filter(|s| s.provider == provider).collect()
    }

    /// Add or replace a model entry
    pub fn add_model(&mut self, spec: ModelSpec) {
        match self.specs.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
    }

    /// Register the factory that builds models for `provider`
    pub fn register_backend(&mut self, provider: impl Into<String>, factory: BackendFactory) {
        let provider = provider.into();
        if self.backends.insert(provider.clone(), factory).is_some() {
            tracing::warn!(provider = %provider, "Replacing existing model backend");
        }
    }

    /// Credential status for every model, read from the process environment
    pub fn availability(&self) -> Vec<ModelAvailability> {
        self.availability_with(|key| env::var(key).ok())
    }

    /// Credential status using a custom variable lookup
    pub fn availability_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ModelAvailability> {
        self.specs
            .iter()
            .map(|spec| {
                let has_key = has_credentials(spec, &lookup);
                let has_backend = self.backends.contains_key(&spec.provider);
                let status = match (has_key, has_backend) {
                    (false, _) => "API key missing",
                    (true, false) => "No backend registered",
                    (true, true) => "Available",
                };
                ModelAvailability {
                    name: spec.name.clone(),
                    display_name: spec.display_name.clone(),
                    provider: spec.provider.clone(),
                    available: has_key && has_backend,
                    status: status.to_string(),
                }
            })
            .collect()
    }

    /// Build a model, checking credentials against a custom variable lookup
    pub fn create_with(
        &self,
        name: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Arc<dyn CompletionModel>, LlmError> {
        let spec = self
            .get(name)
            .ok_or_else(|| LlmError::UnknownModel(name.to_string()))?;

        if !has_credentials(spec, &lookup) {
            let env_var = spec.api_key_env.clone().unwrap_or_default();
            tracing::warn!(model = %spec.name, env_var = %env_var, "Model credentials missing");
            return Err(LlmError::MissingCredentials {
                model: spec.name.clone(),
                env_var,
            });
        }

        let factory = self
            .backends
            .get(&spec.provider)
            .ok_or_else(|| LlmError::NotAvailable(spec.provider.clone()))?;

        tracing::debug!(model = %spec.name, provider = %spec.provider, "Creating model");
        factory(spec)
    }
}

fn has_credentials(spec: &ModelSpec, lookup: &impl Fn(&str) -> Option<String>) -> bool {
    match &spec.api_key_env {
        Some(key) => lookup(key).is_some_and(|v| !v.trim().is_empty()),
        None => true,
    }
}

impl ModelProvider for ModelCatalog {
    fn create(&self, model: &str) -> Result<Arc<dyn CompletionModel>, LlmError> {
        self.create_with(model, |key| env::var(key).ok())
    }
}

impl fmt::Debug for ModelCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut backends: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        backends.sort_unstable();
        f.debug_struct("ModelCatalog")
            .field("models", &self.names())
            .field("backends", &backends)
            .finish()
    }
}

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgoraConfig {
    /// Model for side A
    pub side_a_model: String,
    /// Model for side B
    pub side_b_model: String,
    /// Model used by the judge
    pub judge_model: String,
    /// Turn budget; `None` leaves it to the contest's own default
    pub max_turns: Option<u32>,
    /// Offer tools to speakers
    pub tools_enabled: bool,
    /// Score turns with the judge
    pub judge_enabled: bool,
    /// Raise the log level to at least `debug`
    pub debug: bool,
}

impl Default for AgoraConfig {
    fn default() -> Self {
        Self {
            side_a_model: "mock".to_string(),
            side_b_model: "mock".to_string(),
            judge_model: "mock".to_string(),
            max_turns: None,
            tools_enabled: false,
            judge_enabled: true,
            debug: false,
        }
    }
}

impl AgoraConfig {
    /// Load from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from a custom variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_turns = match lookup("AGORA_MAX_TURNS") {
            Some(value) => Some(
                value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or(ConfigError::InvalidValue {
                        key: "AGORA_MAX_TURNS".to_string(),
                        value,
                    })?,
            ),
            None => defaults.max_turns,
        };

        Ok(Self {
            side_a_model: lookup("AGORA_SIDE_A_MODEL").unwrap_or(defaults.side_a_model),
            side_b_model: lookup("AGORA_SIDE_B_MODEL").unwrap_or(defaults.side_b_model),
            judge_model: lookup("AGORA_JUDGE_MODEL").unwrap_or(defaults.judge_model),
            max_turns,
            tools_enabled: lookup("AGORA_TOOLS")
                .map(|v| v == "1" || v == "true")
                .unwrap_or(defaults.tools_enabled),
            judge_enabled: lookup("AGORA_JUDGE")
                .map(|v| v != "0" && v != "false")
                .unwrap_or(defaults.judge_enabled),
            debug: lookup("AGORA_DEBUG")
                .map(|v| v == "1" || v == "true")
                .unwrap_or(defaults.debug),
        })
    }

    /// Check that every configured model exists in the catalog
    pub fn validate(&self, catalog: &ModelCatalog) -> Result<(), ConfigError> {
        for model in [&self.side_a_model, &self.side_b_model, &self.judge_model] {
            if catalog.get(model).is_none() {
                return Err(ConfigError::UnknownModel(model.clone()));
            }
        }
        Ok(())
    }

    /// Turn budget to use: an explicit request wins, then the configured
    /// budget, then the contest's default
    pub fn turns_or(&self, requested: Option<u32>, default: u32) -> u32 {
        requested.or(self.max_turns).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_catalog() {
        let catalog = ModelCatalog::new();
        assert_eq!(
            catalog.names(),
            vec!["openai-gpt4o", "openai-gpt4o-mini", "gemini-pro", "gemini-flash", "mock"]
        );
        assert_eq!(catalog.get("Google Gemini 1.5 Flash").unwrap().name, "gemini-flash");
        assert_eq!(catalog.by_provider("openai").len(), 2);
    }

    #[test]
    fn test_missing_credentials_is_distinguishable() {
        let catalog = ModelCatalog::new();
        let err = catalog.create_with("openai-gpt4o", vars(&[])).unwrap_err();
        assert!(matches!(err, LlmError::MissingCredentials { ref env_var, .. } if env_var == "OPENAI_API_KEY"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_key_without_backend_is_not_available() {
        let catalog = ModelCatalog::new();
        let err = catalog
            .create_with("gemini-pro", vars(&[("GOOGLE_API_KEY", "k")]))
            .unwrap_err();
        assert!(matches!(err, LlmError::NotAvailable(ref p) if p == "gemini"));

        let err = catalog.create_with("nope", vars(&[])).unwrap_err();
        assert!(matches!(err, LlmError::UnknownModel(_)));
    }

    #[test]
    fn test_registered_backend_builds_model() {
        let mut catalog = ModelCatalog::new();
        catalog.register_backend(
            "openai",
            Arc::new(|spec: &ModelSpec| {
                Ok(Arc::new(MockModel::constant("hi").with_name(spec.model_id.clone())) as Arc<dyn CompletionModel>)
            }),
        );
        let model = catalog
            .create_with("openai-gpt4o-mini", vars(&[("OPENAI_API_KEY", "sk")]))
            .unwrap();
        assert_eq!(model.name(), "gpt-4o-mini");

        let report = catalog.availability_with(vars(&[("OPENAI_API_KEY", "sk")]));
        let status: Vec<_> = report.iter().map(|m| (m.name.as_str(), m.available)).collect();
        assert!(status.contains(&("openai-gpt4o", true)));
        assert!(status.contains(&("gemini-pro", false)));
        assert!(status.contains(&("mock", true)));
    }

    #[test]
    fn test_mock_needs_no_credentials() {
        let catalog = ModelCatalog::new();
        let model = catalog.create_with("mock", vars(&[])).unwrap();
        assert_eq!(model.name(), "mock");
    }

    #[test]
    fn test_config_from_lookup() {
        let config = AgoraConfig::from_lookup(vars(&[
            ("AGORA_SIDE_A_MODEL", "gemini-pro"),
            ("AGORA_MAX_TURNS", "4"),
            ("AGORA_TOOLS", "true"),
            ("AGORA_JUDGE", "0"),
        ]))
        .unwrap();
        assert_eq!(config.side_a_model, "gemini-pro");
        assert_eq!(config.side_b_model, "mock");
        assert_eq!(config.max_turns, Some(4));
        assert!(config.tools_enabled);
        assert!(!config.judge_enabled);
        assert!(config.validate(&ModelCatalog::new()).is_ok());
    }

    #[test]
    fn test_turn_budget_precedence() {
        let unset = AgoraConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(unset.max_turns, None);
        assert_eq!(unset.turns_or(None, 8), 8);
        assert_eq!(unset.turns_or(Some(3), 8), 3);

        let set = AgoraConfig::from_lookup(vars(&[("AGORA_MAX_TURNS", "4")])).unwrap();
        assert_eq!(set.turns_or(None, 8), 4);
        assert_eq!(set.turns_or(Some(2), 8), 2);
    }

    #[test]
    fn test_debug_flag_from_lookup() {
        assert!(!AgoraConfig::from_lookup(vars(&[])).unwrap().debug);
        assert!(AgoraConfig::from_lookup(vars(&[("AGORA_DEBUG", "true")])).unwrap().debug);
        assert!(AgoraConfig::from_lookup(vars(&[("AGORA_DEBUG", "1")])).unwrap().debug);
    }

    #[test]
    fn test_config_rejects_bad_turns() {
        let err = AgoraConfig::from_lookup(vars(&[("AGORA_MAX_TURNS", "zero")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(AgoraConfig::from_lookup(vars(&[("AGORA_MAX_TURNS", "0")])).is_err());

        let config = AgoraConfig {
            judge_model: "gpt-9".into(),
            ..AgoraConfig::default()
        };
        assert!(matches!(config.validate(&ModelCatalog::new()), Err(ConfigError::UnknownModel(_))));
    }
}
