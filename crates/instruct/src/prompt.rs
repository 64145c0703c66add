//! Prompt text and provider payloads.
use serde_json::{json, Value};

use crate::provider::WireFormat;

pub const INSTRUCTION_SYSTEM_PROMPT: &str = "You are a helpful assistant that creates clear, \
step-by-step instructions for tasks. Always follow the exact formatting requirements provided by \
the user. Never use asterisks (*) in your responses. Each step must include duration estimates and \
instruction types (Simple Instruction or Instruction with Reason).";

pub const DURATION_SYSTEM_PROMPT: &str = "You are a helpful assistant that provides accurate time \
estimates for tasks. Always respond with just the time estimate in a clear format.";

const INSTRUCTION_FORMAT: &str = "\
CRITICAL FORMATTING REQUIREMENTS - FOLLOW EXACTLY:
- Do NOT use asterisks (*) anywhere in your response
- Generate 5 to 7 steps total
- Each step MUST be on a single line with this EXACT format:
  \"1. [Concise step description]: DUR [time estimate] Type: [instruction type]\"
- Keep each step concise but informative - include key details without being overly verbose
- Instruction types MUST be either \"Simple Instruction\" or \"Instruction with Reason\"
- Use \"Simple Instruction\" for basic steps
- Use \"Instruction with Reason\" for steps that include explanation or important details
- Provide realistic time estimates for each step
- Use clear, concise language
- Focus on practical implementation

EXACT FORMAT EXAMPLE - COPY THIS STRUCTURE:
1. Gather teapot, water, tea leaves, and heating source: DUR 2 minutes Type: Simple Instruction
2. Fill teapot with fresh cold water: DUR 1 minute Type: Simple Instruction
3. Heat water on stovetop until boiling: DUR 5 minutes Type: Simple Instruction
4. Pour boiling water into clean teapot: DUR 1 minute Type: Simple Instruction
5. Add tea leaves to hot water: DUR 1 minute Type: Simple Instruction
6. Let tea steep for 3-5 minutes: DUR 4 minutes Type: Instruction with Reason
7. Strain tea leaves from liquid: DUR 1 minute Type: Simple Instruction
8. Pour tea into cups and serve: DUR 2 minutes Type: Simple Instruction

IMPORTANT: Each step must be on ONE LINE with DUR and Type on the same line as the step \
description. Keep steps concise but informative. Generate 5 to 7 steps in total";

const DURATION_GUIDANCE: &str = "\
Please provide a realistic time estimate in a clear, concise format. Consider:
- Complexity of the task
- Number of steps involved
- Skill level required
- Tools or equipment needed

Respond with just the time estimate (e.g., \"5-10 minutes\", \"2-3 hours\", \"30-45 minutes\").";

/// One completion request, independent of provider dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ChatRequest {
    pub fn instructions(description: &str, actions: &str, objects: &str) -> Self {
        Self {
            system: INSTRUCTION_SYSTEM_PROMPT.to_string(),
            user: instruction_prompt(description, actions, objects),
            max_tokens: 1200,
            temperature: 0.7,
        }
    }

    pub fn duration(description: &str, actions: &str, objects: &str) -> Self {
        Self {
            system: DURATION_SYSTEM_PROMPT.to_string(),
            user: duration_prompt(description, actions, objects),
            max_tokens: 100,
            temperature: 0.3,
        }
    }
}

pub fn instruction_prompt(description: &str, actions: &str, objects: &str) -> String {
    format!(
        "Based on the following information, generate clean and concise step-by-step \
instructions on how to accomplish the task:\n\n\
Description: {description}\nActions: {actions}\nObjects: {objects}\n\n{INSTRUCTION_FORMAT}"
    )
}

pub fn duration_prompt(description: &str, actions: &str, objects: &str) -> String {
    format!(
        "Based on the following task information, provide an estimated duration for completing \
this task:\n\n\
Description: {description}\nActions: {actions}\nObjects: {objects}\n\n{DURATION_GUIDANCE}"
    )
}

pub(crate) fn build_payload(format: WireFormat, model: &str, request: &ChatRequest) -> Value {
    match format {
        WireFormat::ChatCompletions => json!({
            "model": model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        }),
        // No system role here; the system text leads the single user part.
        WireFormat::GenerateContent => json!({
            "contents": [{
                "parts": [{ "text": format!("{}\n\n{}", request.system, request.user) }]
            }],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_tokens,
            }
        }),
    }
}

/// Pull the completion text out of a provider response. `None` when absent or blank.
pub(crate) fn extract_text(format: WireFormat, body: &Value) -> Option<String> {
    let text = match format {
        WireFormat::ChatCompletions => body.pointer("/choices/0/message/content"),
        WireFormat::GenerateContent => body.pointer("/candidates/0/content/parts/0/text"),
    }?
    .as_str()?
    .trim();

    (!text.is_empty()).then(|| text.to_string())
}
