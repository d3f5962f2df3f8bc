//! Text processing tool.

use std::fmt;
use std::str::FromStr;

use crate::types::ToolError;

/// The recognized text operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOperation {
    Upper,
    Lower,
    Reverse,
}

impl TextOperation {
    pub const ALL: [TextOperation; 3] = [
        TextOperation::Upper,
        TextOperation::Lower,
        TextOperation::Reverse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextOperation::Upper => "upper",
            TextOperation::Lower => "lower",
            TextOperation::Reverse => "reverse",
        }
    }

    /// Label prefixed to the transformed text.
    pub fn label(&self) -> &'static str {
        match self {
            TextOperation::Upper => "Uppercase",
            TextOperation::Lower => "Lowercase",
            TextOperation::Reverse => "Reversed",
        }
    }

    /// Apply the transform. `Reverse` works on code points, not bytes.
    pub fn apply(&self, text: &str) -> String {
        match self {
            TextOperation::Upper => text.to_uppercase(),
            TextOperation::Lower => text.to_lowercase(),
            TextOperation::Reverse => text.chars().rev().collect(),
        }
    }
}

impl fmt::Display for TextOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextOperation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upper" => Ok(TextOperation::Upper),
            "lower" => Ok(TextOperation::Lower),
            "reverse" => Ok(TextOperation::Reverse),
            other => Err(ToolError::UnknownOperation(other.to_string())),
        }
    }
}

/// Run `operation` over `text` and describe the result.
///
/// An unrecognized operation still produces ordinary output naming the bad
/// value and the valid choices; callers report it as a successful result.
pub fn process_text(text: &str, operation: &str) -> String {
    match operation.parse::<TextOperation>() {
        Ok(op) => format!("{}: {}", op.label(), op.apply(text)),
        Err(_) => {
            let operation = operation.to_lowercase();
            tracing::debug!("process_text called with unknown operation '{operation}'");
            let available: Vec<&str> = TextOperation::ALL.iter().map(|op| op.as_str()).collect();
            format!(
                "Unknown operation: {operation}. Available: {}",
                available.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "hello world",
        "Hello, World!",
        "ñandú über straße",
        "日本語のテキスト",
        "emoji 🎨🏠 mix",
        "a\u{301}e\u{301}",
    ];

    fn strip_label<'a>(output: &'a str, label: &str) -> &'a str {
        output
            .strip_prefix(label)
            .and_then(|rest| rest.strip_prefix(": "))
            .unwrap()
    }

    #[test]
    fn test_upper() {
        assert_eq!(process_text("hello world", "upper"), "Uppercase: HELLO WORLD");
    }

    #[test]
    fn test_lower() {
        assert_eq!(process_text("Hello World", "lower"), "Lowercase: hello world");
    }

    #[test]
    fn test_reverse() {
        assert_eq!(process_text("hello", "reverse"), "Reversed: olleh");
    }

    #[test]
    fn test_operation_is_case_insensitive() {
        assert_eq!(process_text("abc", "UPPER"), "Uppercase: ABC");
        assert_eq!(process_text("abc", "Reverse"), "Reversed: cba");
    }

    #[test]
    fn test_unknown_operation_lists_choices() {
        assert_eq!(
            process_text("abc", "Shuffle"),
            "Unknown operation: shuffle. Available: upper, lower, reverse"
        );
    }

    #[test]
    fn test_reverse_is_an_involution() {
        for s in SAMPLES {
            let once = strip_label(&process_text(s, "reverse"), "Reversed").to_string();
            let twice = strip_label(&process_text(&once, "reverse"), "Reversed").to_string();
            assert_eq!(&twice, s);
            assert_eq!(once.chars().count(), s.chars().count());
        }
    }

    #[test]
    fn test_reverse_multibyte() {
        assert_eq!(TextOperation::Reverse.apply("日本語"), "語本日");
        assert_eq!(TextOperation::Reverse.apply("🎨x"), "x🎨");
    }

    #[test]
    fn test_upper_then_lower_normalizes() {
        for s in SAMPLES {
            let upper = strip_label(&process_text(s, "upper"), "Uppercase").to_string();
            let lower = strip_label(&process_text(&upper, "lower"), "Lowercase").to_string();
            assert_eq!(lower, s.to_uppercase().to_lowercase());
        }
    }

    #[test]
    fn test_parse_operation() {
        assert_eq!("LoWeR".parse::<TextOperation>(), Ok(TextOperation::Lower));
        assert!("title".parse::<TextOperation>().is_err());
    }
}
