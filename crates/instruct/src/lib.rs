//! Instruction generation for matched task records.
//!
//! Once a query resolves to a [`Record`](records::Record), this crate asks a
//! hosted LLM for 5 to 7 numbered steps (each with a duration and an
//! instruction type) and, separately, for a whole-task duration estimate.
//!
//! ## Providers
//!
//! | id         | wire format        | default model                    |
//! |------------|--------------------|----------------------------------|
//! | `groq`     | chat completions   | `llama3-8b-8192`                 |
//! | `gemini`   | `generateContent`  | `gemini-1.5-flash-latest`        |
//! | `mistral`  | chat completions   | `mistral-large-latest`           |
//! | `together` | chat completions   | `meta-llama/Llama-3-8b-chat-hf`  |
//! | `deepseek` | chat completions   | `deepseek-chat`                  |
//!
//! API keys are read from `<PROVIDER>_API_KEY` environment variables unless the
//! [`InstructConfig`] carries an override.
//!
//! ## Example
//!
//! ```no_run
//! use instruct::{parse_steps, InstructConfig, InstructionClient, Provider};
//! use records::Record;
//!
//! # async fn run() -> Result<(), instruct::InstructError> {
//! let client = InstructionClient::new(InstructConfig::default())?;
//! let record = Record::new("Tea", "Boil water for tea", "boil; steep", "kettle; cup");
//!
//! let text = client.generate_instructions(Some(Provider::Gemini), &record).await?;
//! for step in parse_steps(&text) {
//!     println!("{}. {} ({:?})", step.number, step.text, step.duration);
//! }
//! println!("total: {}", client.estimate_duration(&record).await?);
//! # Ok(())
//! # }
//! ```
mod client;
mod config;
mod error;
mod prompt;
mod provider;
mod steps;

pub use crate::client::{InstructionClient, InstructionGenerator, ProviderClient};
pub use crate::config::{InstructConfig, ProviderOverride};
pub use crate::error::InstructError;
pub use crate::prompt::{
    duration_prompt, instruction_prompt, ChatRequest, DURATION_SYSTEM_PROMPT,
    INSTRUCTION_SYSTEM_PROMPT,
};
pub use crate::provider::{Provider, ProviderInfo, WireFormat};
pub use crate::steps::{parse_steps, InstructionStep};
