use std::time::Instant;

use async_trait::async_trait;
use records::Record;
use serde_json::Value;

use crate::config::InstructConfig;
use crate::error::InstructError;
use crate::prompt::{build_payload, extract_text, ChatRequest};
use crate::provider::{Provider, ProviderInfo, WireFormat};

/// Capability shared by every provider: turn a task into numbered steps.
#[async_trait]
pub trait InstructionGenerator: Send + Sync {
    fn provider(&self) -> Provider;

    /// Raw provider text in the `N. step: DUR <time> Type: <kind>` shape.
    async fn generate(
        &self,
        description: &str,
        actions: &str,
        objects: &str,
    ) -> Result<String, InstructError>;
}

/// HTTP client bound to a single provider.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    provider: Provider,
    endpoint: String,
    model: String,
    api_key: String,
    http: reqwest::Client,
}

impl ProviderClient {
    /// Resolve endpoint, model and key for `provider` from `cfg`.
    pub fn from_config(provider: Provider, cfg: &InstructConfig) -> Result<Self, InstructError> {
        let http = build_http_client(cfg)?;
        Self::with_http(provider, cfg, http)
    }

    fn with_http(
        provider: Provider,
        cfg: &InstructConfig,
        http: reqwest::Client,
    ) -> Result<Self, InstructError> {
        Ok(Self {
            provider,
            endpoint: cfg.endpoint(provider).to_string(),
            model: cfg.model(provider).to_string(),
            api_key: cfg.api_key(provider)?,
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one completion request and return the trimmed text.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, InstructError> {
        let provider = self.provider;
        let format = provider.wire_format();
        let payload = build_payload(format, &self.model, request);
        let started = Instant::now();

        let builder = match format {
            WireFormat::ChatCompletions => self
                .http
                .post(&self.endpoint)
                .bearer_auth(&self.api_key),
            WireFormat::GenerateContent => self
                .http
                .post(format!(
                    "{}/{}:generateContent",
                    self.endpoint.trim_end_matches('/'),
                    self.model
                ))
                .query(&[("key", self.api_key.as_str())]),
        };

        let response = builder
            .json(&payload)
            .send()
            .await
            .map_err(|e| InstructError::Http {
                provider,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%provider, status = status.as_u16(), "provider_request_failed");
            return Err(InstructError::Status {
                provider,
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| InstructError::InvalidResponse {
                provider,
                message: e.to_string(),
            })?;
        let text = extract_text(format, &body).ok_or(InstructError::EmptyResponse { provider })?;

        tracing::info!(
            %provider,
            model = %self.model,
            chars = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "provider_completed"
        );
        Ok(text)
    }

    /// Whole-task duration estimate such as `"10-15 minutes"`.
    pub async fn estimate(
        &self,
        description: &str,
        actions: &str,
        objects: &str,
    ) -> Result<String, InstructError> {
        self.complete(&ChatRequest::duration(description, actions, objects))
            .await
    }
}

#[async_trait]
impl InstructionGenerator for ProviderClient {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn generate(
        &self,
        description: &str,
        actions: &str,
        objects: &str,
    ) -> Result<String, InstructError> {
        self.complete(&ChatRequest::instructions(description, actions, objects))
            .await
    }
}

/// Entry point used by the CLI and server: picks providers per call from one config.
#[derive(Debug, Clone)]
pub struct InstructionClient {
    cfg: InstructConfig,
    http: reqwest::Client,
}

impl InstructionClient {
    pub fn new(cfg: InstructConfig) -> Result<Self, InstructError> {
        cfg.validate()?;
        let http = build_http_client(&cfg)?;
        Ok(Self { cfg, http })
    }

    pub fn config(&self) -> &InstructConfig {
        &self.cfg
    }

    pub fn providers(&self) -> Vec<ProviderInfo> {
        Provider::ALL.into_iter().map(Provider::info).collect()
    }

    pub fn client_for(&self, provider: Provider) -> Result<ProviderClient, InstructError> {
        ProviderClient::with_http(provider, &self.cfg, self.http.clone())
    }

    /// Numbered steps for `record` from `provider` (or the configured default).
    pub async fn generate_instructions(
        &self,
        provider: Option<Provider>,
        record: &Record,
    ) -> Result<String, InstructError> {
        let provider = provider.unwrap_or(self.cfg.default_provider);
        let client = self.client_for(provider)?;
        client
            .generate(&record.description, &record.actions, &record.objects)
            .await
            .inspect_err(|err| tracing::warn!(%provider, error = %err, "instructions_failed"))
    }

    /// Duration estimate for `record` from the configured duration provider.
    pub async fn estimate_duration(&self, record: &Record) -> Result<String, InstructError> {
        let provider = self.cfg.duration_provider;
        let client = self.client_for(provider)?;
        client
            .estimate(&record.description, &record.actions, &record.objects)
            .await
            .inspect_err(|err| tracing::warn!(%provider, error = %err, "duration_failed"))
    }
}

fn build_http_client(cfg: &InstructConfig) -> Result<reqwest::Client, InstructError> {
    reqwest::Client::builder()
        .timeout(cfg.timeout())
        .build()
        .map_err(|e| InstructError::InvalidConfig(format!("http client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderOverride;

    fn cfg_with_key(provider: Provider) -> InstructConfig {
        let mut cfg = InstructConfig::default();
        cfg.providers.insert(
            provider,
            ProviderOverride {
                api_key: Some("test-key".into()),
                ..Default::default()
            },
        );
        cfg
    }

    #[test]
    fn provider_client_resolves_defaults() {
        let client = ProviderClient::from_config(Provider::Mistral, &cfg_with_key(Provider::Mistral))
            .expect("client");
        assert_eq!(client.provider(), Provider::Mistral);
        assert_eq!(client.model(), "mistral-large-latest");
        assert_eq!(client.endpoint, "https://api.mistral.ai/v1/chat/completions");
    }

    #[test]
    fn instruction_client_lists_all_providers() {
        let client = InstructionClient::new(InstructConfig::default()).expect("client");
        let ids: Vec<&str> = client.providers().iter().map(|p| p.id.id()).collect();
        assert_eq!(ids, vec!["groq", "gemini", "mistral", "together", "deepseek"]);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = InstructConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(InstructionClient::new(cfg).is_err());
    }
}
