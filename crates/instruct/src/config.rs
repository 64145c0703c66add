//! Configuration for instruction generation.
//!
//! Keys are never stored in defaults. A provider's key comes from its override
//! (`api_key`) when set, else from the provider's environment variable at call
//! time.
//!
//! ```rust
//! use instruct::{InstructConfig, Provider};
//!
//! let config = InstructConfig::default();
//! assert_eq!(config.default_provider, Provider::Groq);
//! assert_eq!(config.endpoint(Provider::Mistral), "https://api.mistral.ai/v1/chat/completions");
//! config.validate().expect("defaults are valid");
//! ```
use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InstructError;
use crate::provider::Provider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructConfig {
    /// Provider used when a request does not name one.
    #[serde(default)]
    pub default_provider: Provider,
    /// Provider asked for whole-task duration estimates.
    #[serde(default)]
    pub duration_provider: Provider,
    /// Per-request timeout for provider calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional per-provider endpoint, model and key overrides.
    #[serde(default)]
    pub providers: BTreeMap<Provider, ProviderOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOverride {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl InstructConfig {
    pub fn validate(&self) -> Result<(), InstructError> {
        if self.timeout_secs == 0 {
            return Err(InstructError::InvalidConfig(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        for (provider, over) in &self.providers {
            if let Some(endpoint) = over.endpoint.as_deref() {
                reqwest::Url::parse(endpoint).map_err(|e| {
                    InstructError::InvalidConfig(format!("{provider} endpoint {endpoint:?}: {e}"))
                })?;
            }
            if over.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
                return Err(InstructError::InvalidConfig(format!(
                    "{provider} model must not be empty"
                )));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoint(&self, provider: Provider) -> &str {
        self.providers
            .get(&provider)
            .and_then(|o| o.endpoint.as_deref())
            .unwrap_or(provider.default_endpoint())
    }

    pub fn model(&self, provider: Provider) -> &str {
        self.providers
            .get(&provider)
            .and_then(|o| o.model.as_deref())
            .unwrap_or(provider.default_model())
    }

    /// Configured key, falling back to the provider's environment variable.
    pub fn api_key(&self, provider: Provider) -> Result<String, InstructError> {
        if let Some(key) = self.providers.get(&provider).and_then(|o| o.api_key.clone()) {
            return Ok(key);
        }
        std::env::var(provider.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(InstructError::MissingApiKey {
                provider,
                env: provider.api_key_env(),
            })
    }
}

impl Default for InstructConfig {
    fn default() -> Self {
        Self {
            default_provider: Provider::default(),
            duration_provider: Provider::default(),
            timeout_secs: default_timeout_secs(),
            providers: BTreeMap::new(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
