//! Shared UI primitives for catat
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `title: `
//! - Feedback: single word when possible: `Saved.`

use anyhow::Result;
use inquire::{ui::RenderConfig, Confirm, InquireError, Text};

// ============================================================================
// Layout Primitives
// ============================================================================

/// Truncate a string to max_chars, adding ellipsis if needed.
/// Result will be at most max_chars characters (including ellipsis if truncated).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{}…", kept.trim_end())
}

/// Pad or truncate to exactly `width` characters for table columns.
pub fn cell(s: &str, width: usize) -> String {
    let text = truncate(s, width);
    let pad = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(pad))
}

// ============================================================================
// Message Functions
// ============================================================================

/// Print a status message to stdout
#[inline]
pub fn status(msg: &str) {
    println!("{}", msg);
}

// ============================================================================
// Prompts
// ============================================================================

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Prompt for yes/no confirmation (default: no)
pub fn confirm(prompt: &str) -> Result<bool> {
    let result = Confirm::new(prompt)
        .with_render_config(minimal_render_config())
        .with_default(false)
        .prompt();

    match result {
        Ok(answer) => Ok(answer),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Result type for form inputs that can be cancelled
#[derive(Debug, PartialEq, Eq)]
pub enum FormResult<T> {
    Value(T),
    Cancelled,
}

/// Prompt for a field with optional current value.
/// Format: `field [current] (- clears): ` or `field: ` if no current value.
/// Empty input keeps the current value (or empty string if no current).
/// With `trim` off, any other answer is returned exactly as typed.
pub fn prompt_field(field: &str, current: Option<&str>, trim: bool) -> Result<FormResult<String>> {
    let prompt = match current {
        Some(val) if !val.is_empty() => {
            format!("{} [{}] (- clears): ", field, truncate(val, 30))
        }
        _ => format!("{}: ", field),
    };

    let result = Text::new(&prompt)
        .with_render_config(minimal_render_config())
        .prompt();

    match result {
        Ok(input) => Ok(FormResult::Value(resolve_field_input(&input, current, trim))),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Apply the prompt conventions: blank keeps `current`, `-` clears it.
fn resolve_field_input(input: &str, current: Option<&str>, trim: bool) -> String {
    let has_value = current.is_some_and(|v| !v.is_empty());
    let trimmed = input.trim();

    if trimmed == "-" && has_value {
        String::new()
    } else if trimmed.is_empty() {
        current.unwrap_or("").to_string()
    } else if trim {
        trimmed.to_string()
    } else {
        input.to_string()
    }
}
