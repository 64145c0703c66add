//! The closed set of hosted providers and their wire defaults.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InstructError;

/// Hosted LLM provider used for instruction generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Groq,
    Gemini,
    Mistral,
    Together,
    #[serde(rename = "deepseek")]
    DeepSeek,
}

/// Request/response dialect spoken by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// OpenAI-compatible `/chat/completions` with Bearer auth.
    ChatCompletions,
    /// Google `generateContent` with the key as a query parameter.
    GenerateContent,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::Groq,
        Provider::Gemini,
        Provider::Mistral,
        Provider::Together,
        Provider::DeepSeek,
    ];

    /// Stable lowercase identifier used in configs, URLs and logs.
    pub fn id(self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::Gemini => "gemini",
            Provider::Mistral => "mistral",
            Provider::Together => "together",
            Provider::DeepSeek => "deepseek",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Groq => "Groq",
            Provider::Gemini => "Gemini 1.5",
            Provider::Mistral => "Mistral",
            Provider::Together => "Together AI",
            Provider::DeepSeek => "DeepSeek",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Provider::Groq => "Fast inference with Llama 3",
            Provider::Gemini => "Google's advanced AI model",
            Provider::Mistral => "European AI with strong reasoning",
            Provider::Together => "Open-source models at scale",
            Provider::DeepSeek => "Advanced reasoning capabilities",
        }
    }

    pub fn wire_format(self) -> WireFormat {
        match self {
            Provider::Gemini => WireFormat::GenerateContent,
            _ => WireFormat::ChatCompletions,
        }
    }

    /// Base endpoint. For Gemini the model name is substituted into the path.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Provider::Groq => "https://api.groq.com/openai/v1/chat/completions",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
            Provider::Mistral => "https://api.mistral.ai/v1/chat/completions",
            Provider::Together => "https://api.together.xyz/v1/chat/completions",
            Provider::DeepSeek => "https://api.deepseek.com/v1/chat/completions",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Groq => "llama3-8b-8192",
            Provider::Gemini => "gemini-1.5-flash-latest",
            Provider::Mistral => "mistral-large-latest",
            Provider::Together => "meta-llama/Llama-3-8b-chat-hf",
            Provider::DeepSeek => "deepseek-chat",
        }
    }

    /// Environment variable consulted for the API key.
    pub fn api_key_env(self) -> &'static str {
        match self {
            Provider::Groq => "GROQ_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::Mistral => "MISTRAL_API_KEY",
            Provider::Together => "TOGETHER_API_KEY",
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }

    pub fn info(self) -> ProviderInfo {
        ProviderInfo {
            id: self,
            name: self.display_name(),
            description: self.description(),
            model: self.default_model(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = InstructError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.id() == wanted)
            .ok_or_else(|| InstructError::UnknownProvider(s.to_string()))
    }
}

/// Picker entry for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub id: Provider,
    pub name: &'static str,
    pub description: &'static str,
    pub model: &'static str,
}
