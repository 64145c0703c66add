//! Parsing of numbered provider output into structured steps.
//!
//! Expected line shape:
//!
//! ```text
//! 3. Heat water on stovetop until boiling: DUR 5 minutes Type: Simple Instruction
//! ```
//!
//! Lines that are not numbered are ignored. `DUR` runs up to the next capital
//! `T` (normally the `Type:` marker).
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("static regex"));
static DURATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"DUR\s+([^T]+)").expect("static regex"));
static KIND: Lazy<Regex> = Lazy::new(|| Regex::new(r"Type:\s*(.+)$").expect("static regex"));
static TRAILING_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*$").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    /// 1-based, renumbered in output order.
    pub number: usize,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_type: Option<String>,
}

pub fn parse_steps(text: &str) -> Vec<InstructionStep> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| NUMBERED.find(line).map(|m| &line[m.end()..]))
        .enumerate()
        .map(|(i, content)| parse_step(i + 1, content))
        .collect()
}

fn parse_step(number: usize, content: &str) -> InstructionStep {
    let mut text = content.to_string();

    let duration = DURATION
        .captures(content)
        .map(|c| c[1].trim().to_string())
        .filter(|d| !d.is_empty());
    if duration.is_some() {
        text = DURATION.replace(&text, "").trim().to_string();
    }

    let instruction_type = KIND
        .captures(content)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty());
    if instruction_type.is_some() {
        text = KIND.replace(&text, "").trim().to_string();
    }

    let text = TRAILING_COLON.replace(&text, "").trim().to_string();
    InstructionStep {
        number,
        text,
        duration,
        instruction_type,
    }
}
