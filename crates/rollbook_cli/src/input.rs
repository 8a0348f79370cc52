//! Prompt and parse helpers for menu-driven input.
//!
//! # Invariants
//! - Parse failures never reach storage; callers report them and re-prompt.
//! - Empty input for optional fields means "not recorded", never an error.

use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};

use rollbook_core::StudentId;

/// Recoverable input failure. The loop reports it and shows the menu again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// An id field did not parse as a whole number.
    InvalidId(String),
    /// An age field was non-empty but did not parse as a whole number.
    InvalidAge(String),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "id must be a whole number, got `{value}`"),
            Self::InvalidAge(value) => write!(f, "age must be a whole number, got `{value}`"),
        }
    }
}

impl std::error::Error for InputError {}

/// Writes `prompt`, flushes, and reads one trimmed line.
///
/// Returns `None` when the input stream is exhausted.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> std::io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Parses a required student id.
pub fn parse_id(value: &str) -> Result<StudentId, InputError> {
    value
        .parse::<StudentId>()
        .map_err(|_| InputError::InvalidId(value.to_string()))
}

/// Parses an optional age: empty input means unknown.
pub fn parse_age(value: &str) -> Result<Option<i64>, InputError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| InputError::InvalidAge(value.to_string()))
}

/// Normalizes an optional free-text field: empty input means none.
pub fn optional_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
