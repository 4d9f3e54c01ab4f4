//! Structured errors
//!
//! Errors never crash the calculator. Converters turn them into a fixed
//! message for their page, the evaluator turns them into the "Error" display.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const DATE_FORMAT: &str = "DATE_FORMAT";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const EVAL_ERROR: &str = "EVAL_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const OVERFLOW: &str = "OVERFLOW";
}

/// Where an error came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Input field that failed validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// The offending raw input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error shared by every Tally crate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
}

impl TallyError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: name the field that failed
    pub fn in_field(mut self, field: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.field = Some(field.into());
        self
    }

    /// Builder: record the offending input
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.input = Some(input.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_INPUT, format!("Invalid input: {}", details.into()))
    }

    pub fn not_a_number(field: &str, input: &str) -> Self {
        Self::invalid_input(format!("{} is not a number", field))
            .in_field(field)
            .with_input(input)
            .with_suggestion("Enter a plain decimal number such as 12.5")
    }

    pub fn date_format(input: &str) -> Self {
        Self::new(codes::DATE_FORMAT, format!("Not an ISO date: '{}'", input))
            .with_input(input)
            .with_suggestion("Use format YYYY-MM-DD")
    }

    pub fn unknown_unit(category: &str, unit: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown {} unit: {}", category, unit))
            .with_input(unit)
    }

    pub fn evaluation(details: impl Into<String>) -> Self {
        Self::new(codes::EVAL_ERROR, details)
    }

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, "Division by zero")
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Math domain error: {}", details.into()))
    }

    pub fn overflow() -> Self {
        Self::new(codes::OVERFLOW, "Result too large")
    }
}

impl std::fmt::Display for TallyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for TallyError {}
