//! Reading reals out of free-text input fields

use thiserror::Error;

use crate::TallyError;

/// Error type for number parsing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Empty input")]
    Empty,

    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Not a finite number: {0}")]
    NonFinite(String),
}

/// Parse a real typed into an entry field.
///
/// Accepts surrounding whitespace, a sign, decimals and exponents
/// (`" -1.5e3 "`). Infinities and NaN are rejected.
pub fn parse_real(input: &str) -> Result<f64, NumberError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(NumberError::Empty);
    }
    let value: f64 = s.parse().map_err(|_| NumberError::ParseError(s.to_string()))?;
    if !value.is_finite() {
        return Err(NumberError::NonFinite(s.to_string()));
    }
    Ok(value)
}

impl From<NumberError> for TallyError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::Empty => TallyError::invalid_input("empty field"),
            NumberError::ParseError(s) => TallyError::invalid_input(format!("'{}' is not a number", s))
                .with_input(s),
            NumberError::NonFinite(s) => TallyError::invalid_input(format!("'{}' is not finite", s))
                .with_input(s),
        }
    }
}
