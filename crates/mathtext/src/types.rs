//! Core data types shared by the tool bodies.

use std::fmt;

/// A numeric operand that remembers how the caller wrote it.
///
/// Tool output echoes operands verbatim, so `5` stays `5` and `2.50` stays
/// `2.50`, while arithmetic runs on the parsed `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    raw: String,
    value: f64,
}

impl Operand {
    /// Build an operand from an already-parsed value and its source text.
    pub fn new(raw: impl Into<String>, value: f64) -> Self {
        Self {
            raw: raw.into(),
            value,
        }
    }

    /// Parse an operand from text. Surrounding whitespace is ignored for
    /// parsing but kept out of the echoed form.
    pub fn parse(raw: &str) -> ToolResult<Self> {
        let trimmed = raw.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| ToolError::InvalidNumber(raw.to_string()))?;
        Ok(Self::new(trimmed, value))
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Errors that can occur in the tool bodies.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

pub type ToolResult<T> = Result<T, ToolError>;
