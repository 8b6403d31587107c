//! Field constraints: required values, character limits and remaining counts.
//!
//! Lengths are counted in characters (Unicode scalar values), so a limit is
//! never hit halfway through a multi-byte character.

use crate::error::ValidationError;

/// Maximum characters in the short description.
pub const DESCRIPTION_LIMIT: usize = 60;

/// Maximum characters in the body.
pub const BODY_LIMIT: usize = 1000;

/// Number of characters in `value`.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Characters left before `value` reaches `limit`. Never negative.
pub fn remaining(value: &str, limit: usize) -> usize {
    limit.saturating_sub(char_len(value))
}

/// The longest prefix of `value` that fits in `limit` characters.
pub fn truncate_to_limit(value: &str, limit: usize) -> &str {
    match value.char_indices().nth(limit) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Append `ch` to `value` unless that would break the field's rules.
///
/// Returns `false` when the character was rejected: the field is at its
/// limit, or `ch` is a control character the field does not accept
/// (single-line fields take no newlines at all).
pub fn insert_char(value: &mut String, ch: char, limit: Option<usize>, multiline: bool) -> bool {
    let allowed = if ch == '\n' { multiline } else { !ch.is_control() };
    if !allowed {
        return false;
    }
    if limit.is_some_and(|limit| char_len(value) >= limit) {
        return false;
    }
    value.push(ch);
    true
}

/// Remove the last character. Returns `false` if the value was empty.
pub fn delete_char(value: &mut String) -> bool {
    value.pop().is_some()
}

/// The description is required and capped.
pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if value.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacter { field: "description" });
    }
    check_limit("description", value, DESCRIPTION_LIMIT)
}

/// Reduce external text to a single-line value: keep only the first line,
/// drop control characters, then cut to `limit`.
pub fn single_line(value: &str, limit: usize) -> String {
    let first_line = value.lines().next().unwrap_or("");
    let printable: String = first_line.chars().filter(|ch| !ch.is_control()).collect();
    truncate_to_limit(&printable, limit).to_string()
}

/// The body is optional but capped.
pub fn validate_body(value: &str) -> Result<(), ValidationError> {
    check_limit("body", value, BODY_LIMIT)
}

fn check_limit(field: &'static str, value: &str, limit: usize) -> Result<(), ValidationError> {
    if char_len(value) > limit {
        return Err(ValidationError::LimitExceeded { field, limit });
    }
    Ok(())
}

/// Prompt text followed by the live remaining count.
pub fn remaining_prompt(prompt: &str, value: &str, limit: usize) -> String {
    format!("{} {} characters remaining", prompt, remaining(value, limit))
}
