//! Integer numeral bases
//!
//! Integers are arbitrary size, so "ffffffffffffffffffffffff" converts as
//! readily as "ff".

use std::fmt;
use dashu_int::UBig;
use serde::{Deserialize, Serialize};
use tally_plugin::prelude::*;

use crate::helpers::extract_choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumeralBase {
    Decimal,
    Binary,
    Octal,
    Hexadecimal,
}

impl NumeralBase {
    /// Dropdown order
    pub const ALL: [NumeralBase; 4] = [
        NumeralBase::Decimal,
        NumeralBase::Binary,
        NumeralBase::Octal,
        NumeralBase::Hexadecimal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NumeralBase::Decimal => "Decimal",
            NumeralBase::Binary => "Binary",
            NumeralBase::Octal => "Octal",
            NumeralBase::Hexadecimal => "Hexadecimal",
        }
    }

    pub fn radix(self) -> u32 {
        match self {
            NumeralBase::Decimal => 10,
            NumeralBase::Binary => 2,
            NumeralBase::Octal => 8,
            NumeralBase::Hexadecimal => 16,
        }
    }

    /// Literal prefix, empty for decimal
    pub fn prefix(self) -> &'static str {
        match self {
            NumeralBase::Decimal => "",
            NumeralBase::Binary => "0b",
            NumeralBase::Octal => "0o",
            NumeralBase::Hexadecimal => "0x",
        }
    }
}

impl fmt::Display for NumeralBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A signed integer of any size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeral {
    negative: bool,
    magnitude: UBig,
}

impl Numeral {
    /// Parse digits written in `base`.
    ///
    /// Accepts surrounding whitespace, a sign, the base's own prefix in
    /// either case, and single underscores between digits.
    pub fn parse(input: &str, base: NumeralBase) -> Result<Self, TallyError> {
        let invalid = || {
            TallyError::invalid_input(format!("'{}' is not a {} number", input, base.label().to_lowercase()))
                .with_input(input)
        };

        let s = input.trim();
        let (negative, s) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let prefix = base.prefix();
        let s = match (s.get(..2), s.get(2..)) {
            // An underscore may follow the prefix directly
            (Some(head), Some(rest)) if !prefix.is_empty() && head.eq_ignore_ascii_case(prefix) => {
                rest.strip_prefix('_').unwrap_or(rest)
            }
            _ => s,
        };

        if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
            return Err(invalid());
        }
        let digits: String = s.chars().filter(|&c| c != '_').collect();
        if !digits.chars().all(|c| c.is_digit(base.radix())) {
            return Err(invalid());
        }

        let magnitude = UBig::from_str_radix(&digits, base.radix()).map_err(|_| invalid())?;
        let negative = negative && magnitude != UBig::ZERO;
        Ok(Numeral { negative, magnitude })
    }

    /// Render in `base`: plain digits for decimal, prefixed lowercase
    /// otherwise (`0b1010`, `0o17`, `-0xff`)
    pub fn render(&self, base: NumeralBase) -> String {
        let digits = match base {
            NumeralBase::Decimal => format!("{}", self.magnitude),
            NumeralBase::Binary => format!("{:b}", self.magnitude),
            NumeralBase::Octal => format!("{:o}", self.magnitude),
            NumeralBase::Hexadecimal => format!("{:x}", self.magnitude),
        };
        let sign = if self.negative { "-" } else { "" };
        format!("{}{}{}", sign, base.prefix(), digits)
    }
}

/// Re-express `input` from one base in another
pub fn convert_numeral(input: &str, from: NumeralBase, to: NumeralBase) -> Result<String, TallyError> {
    Ok(Numeral::parse(input, from)?.render(to))
}

pub struct NumeralConverter;

static NUMERAL_EXAMPLES: [&str; 3] = [
    "255 Decimal → Hexadecimal = 0xff",
    "ff Hexadecimal → Decimal = 255",
    "-10 Decimal → Binary = -0b1010",
];

fn base_options() -> [(&'static str, NumeralBase); 4] {
    NumeralBase::ALL.map(|b| (b.label(), b))
}

impl ConverterPlugin for NumeralConverter {
    fn meta(&self) -> ConverterMeta {
        let labels: Vec<&'static str> = NumeralBase::ALL.iter().map(|b| b.label()).collect();
        ConverterMeta {
            name: "numeral",
            title: "Numeral System",
            icon: "🔢",
            description: "Rewrite an integer in decimal, binary, octal or hexadecimal",
            fields: vec![
                FieldMeta::entry("value", "Value"),
                FieldMeta::choice("from", "From", labels.clone()),
                FieldMeta::choice("to", "To", labels),
            ],
            failure: "Invalid input for selected base",
            examples: &NUMERAL_EXAMPLES,
            category: "programming",
        }
    }

    fn compute(&self, fields: &Fields, _ctx: &ConvertContext) -> Result<String, TallyError> {
        let value = fields.require("value")?;
        let from = extract_choice(fields, "from", &base_options())?;
        let to = extract_choice(fields, "to", &base_options())?;
        convert_numeral(value, from, to).map_err(|e| e.in_field("value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NumeralBase::*;

    fn page(value: &str, from: &str, to: &str) -> String {
        let fields = Fields::new().with("value", value).with("from", from).with("to", to);
        NumeralConverter.calculate(&fields, &ConvertContext::new())
    }

    #[test]
    fn test_decimal_to_hex_and_back() {
        assert_eq!(convert_numeral("255", Decimal, Hexadecimal).unwrap(), "0xff");
        assert_eq!(convert_numeral("ff", Hexadecimal, Decimal).unwrap(), "255");
        assert_eq!(convert_numeral("FF", Hexadecimal, Decimal).unwrap(), "255");
    }

    #[test]
    fn test_prefixed_output() {
        assert_eq!(convert_numeral("10", Decimal, Binary).unwrap(), "0b1010");
        assert_eq!(convert_numeral("64", Decimal, Octal).unwrap(), "0o100");
        assert_eq!(convert_numeral("0", Decimal, Hexadecimal).unwrap(), "0x0");
        assert_eq!(convert_numeral("-255", Decimal, Hexadecimal).unwrap(), "-0xff");
        assert_eq!(convert_numeral("-0", Decimal, Binary).unwrap(), "0b0");
    }

    #[test]
    fn test_lenient_input() {
        assert_eq!(convert_numeral("-0x1F", Hexadecimal, Decimal).unwrap(), "-31");
        assert_eq!(convert_numeral(" 1_000 ", Decimal, Decimal).unwrap(), "1000");
        assert_eq!(convert_numeral("0b101", Binary, Decimal).unwrap(), "5");
        assert_eq!(convert_numeral("007", Decimal, Decimal).unwrap(), "7");
    }

    #[test]
    fn test_invalid_digits() {
        assert!(convert_numeral("12", Binary, Decimal).is_err());
        assert!(convert_numeral("0x1f", Decimal, Binary).is_err());
        assert!(convert_numeral("1__0", Decimal, Binary).is_err());
        assert!(convert_numeral("_1", Decimal, Binary).is_err());
        assert!(convert_numeral("", Decimal, Binary).is_err());
        assert!(convert_numeral("-", Decimal, Binary).is_err());
        assert!(convert_numeral("1.5", Decimal, Binary).is_err());
    }

    #[test]
    fn test_arbitrary_size() {
        let big = "340282366920938463463374607431768211456"; // 2^128
        let hex = convert_numeral(big, Decimal, Hexadecimal).unwrap();
        assert_eq!(hex, format!("0x1{}", "0".repeat(32)));
        assert_eq!(convert_numeral(&hex, Hexadecimal, Decimal).unwrap(), big);
    }

    #[test]
    fn test_page_text() {
        assert_eq!(page("255", "Decimal", "Hexadecimal"), "0xff");
        assert_eq!(page("9", "Octal", "Decimal"), "Invalid input for selected base");
    }
}
