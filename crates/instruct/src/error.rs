use thiserror::Error;

use crate::provider::Provider;

/// Errors surfaced while talking to an instruction provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InstructError {
    /// No API key configured and none in the provider's environment variable.
    #[error("no API key for {provider}: set {env}")]
    MissingApiKey {
        provider: Provider,
        env: &'static str,
    },
    /// Transport-level failure (connect, timeout, TLS).
    #[error("request to {provider} failed: {message}")]
    Http { provider: Provider, message: String },
    /// The provider answered with a non-success status.
    #[error("{provider} API error: {status} {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },
    /// The response parsed but carried no text.
    #[error("no response from {provider}")]
    EmptyResponse { provider: Provider },
    /// The response body was not the JSON shape the provider documents.
    #[error("invalid response from {provider}: {message}")]
    InvalidResponse { provider: Provider, message: String },
    #[error("invalid instruct config: {0}")]
    InvalidConfig(String),
    #[error("unsupported provider: {0}")]
    UnknownProvider(String),
}

impl InstructError {
    pub fn provider(&self) -> Option<Provider> {
        match self {
            InstructError::MissingApiKey { provider, .. }
            | InstructError::Http { provider, .. }
            | InstructError::Status { provider, .. }
            | InstructError::EmptyResponse { provider }
            | InstructError::InvalidResponse { provider, .. } => Some(*provider),
            InstructError::InvalidConfig(_) | InstructError::UnknownProvider(_) => None,
        }
    }

    /// Whether the caller got here through a bad request rather than a provider fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            InstructError::InvalidConfig(_) | InstructError::UnknownProvider(_)
        )
    }
}
