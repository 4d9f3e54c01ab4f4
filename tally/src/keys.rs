//! Calculator keys
//!
//! Every key has a label; drivers send labels (or an ASCII alias) and get a
//! `Key` back through `FromStr`.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Serializer};
use tally_core::TallyError;
use thiserror::Error;

use crate::functions::Function;

static DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// 0-9
    Digit(u8),
    DoubleZero,
    Point,
    Add,
    Subtract,
    Multiply,
    Divide,
    OpenParen,
    CloseParen,
    Pi,
    E,
    /// Last result
    Ans,
    /// xʸ
    Power,
    /// ʸ√x
    Root,
    /// EXP, times ten to the power
    Scientific,
    Function(Function),
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
    MemoryStore,
    Clear,
    Backspace,
    Equals,
    Percent,
    Negate,
    /// DEG/RAD/GRAD cycle
    AngleMode,
    /// 2nd
    Inverse,
}

impl Key {
    pub fn label(self) -> &'static str {
        match self {
            Key::Digit(d) => DIGITS.get(d as usize).copied().unwrap_or("?"),
            Key::DoubleZero => "00",
            Key::Point => ".",
            Key::Add => "+",
            Key::Subtract => "−",
            Key::Multiply => "×",
            Key::Divide => "÷",
            Key::OpenParen => "(",
            Key::CloseParen => ")",
            Key::Pi => "π",
            Key::E => "e",
            Key::Ans => "Ans",
            Key::Power => "xʸ",
            Key::Root => "ʸ√x",
            Key::Scientific => "EXP",
            Key::Function(f) => f.label(),
            Key::MemoryClear => "MC",
            Key::MemoryRecall => "MR",
            Key::MemoryAdd => "M+",
            Key::MemorySubtract => "M−",
            Key::MemoryStore => "MS",
            Key::Clear => "C",
            Key::Backspace => "⌫",
            Key::Equals => "=",
            Key::Percent => "%",
            Key::Negate => "±",
            Key::AngleMode => "DRG",
            Key::Inverse => "2nd",
        }
    }

    /// Binary operators, which replace a trailing operator instead of
    /// stacking after it
    pub fn is_binary_operator(self) -> bool {
        matches!(self, Key::Add | Key::Subtract | Key::Multiply | Key::Divide | Key::Power)
    }

    /// Key bound to a physical keyboard key, if any.
    ///
    /// Accepts the characters `0-9 . + - * / ( )` and the key names
    /// Return/Enter, BackSpace and Escape.
    pub fn from_keyboard(name: &str) -> Option<Key> {
        let key = match name {
            "Return" | "Enter" => Key::Equals,
            "BackSpace" | "Backspace" => Key::Backspace,
            "Escape" => Key::Clear,
            "+" => Key::Add,
            "-" => Key::Subtract,
            "*" => Key::Multiply,
            "/" => Key::Divide,
            "." => Key::Point,
            "(" => Key::OpenParen,
            ")" => Key::CloseParen,
            _ => {
                let mut chars = name.chars();
                let digit = chars.next()?.to_digit(10)?;
                if chars.next().is_some() {
                    return None;
                }
                Key::Digit(digit as u8)
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeyError {
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

impl From<KeyError> for TallyError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::UnknownKey(label) => TallyError::invalid_input(format!("unknown key '{}'", label))
                .with_input(label)
                .with_suggestion("Send a key label such as 7, ×, sin, MR or ="),
        }
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(f) = Function::ALL.iter().find(|f| f.label() == s) {
            return Ok(Key::Function(*f));
        }
        let key = match s {
            "00" => Key::DoubleZero,
            "." => Key::Point,
            "+" => Key::Add,
            "−" | "-" => Key::Subtract,
            "×" | "*" => Key::Multiply,
            "÷" | "/" => Key::Divide,
            "(" => Key::OpenParen,
            ")" => Key::CloseParen,
            "π" | "pi" => Key::Pi,
            "e" => Key::E,
            "Ans" | "ans" => Key::Ans,
            "xʸ" | "^" | "x^y" => Key::Power,
            "ʸ√x" | "root" | "y_root" => Key::Root,
            "EXP" => Key::Scientific,
            "asin" => Key::Function(Function::Asin),
            "acos" => Key::Function(Function::Acos),
            "atan" => Key::Function(Function::Atan),
            "10^x" => Key::Function(Function::Pow10),
            "exp" => Key::Function(Function::Exp),
            "sqrt" => Key::Function(Function::Sqrt),
            "x^2" => Key::Function(Function::Square),
            "cbrt" => Key::Function(Function::Cbrt),
            "x^3" => Key::Function(Function::Cube),
            "!" | "fact" => Key::Function(Function::Factorial),
            "MC" => Key::MemoryClear,
            "MR" => Key::MemoryRecall,
            "M+" => Key::MemoryAdd,
            "M−" | "M-" => Key::MemorySubtract,
            "MS" => Key::MemoryStore,
            "C" | "clear" => Key::Clear,
            "⌫" | "back" | "backspace" => Key::Backspace,
            "=" | "enter" => Key::Equals,
            "%" => Key::Percent,
            "±" | "+/-" | "neg" => Key::Negate,
            "DRG" | "DEG" | "RAD" | "GRAD" | "angle" => Key::AngleMode,
            "2nd" | "inv" => Key::Inverse,
            _ => {
                let mut chars = s.chars();
                match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
                    (Some(d), None) => Key::Digit(d as u8),
                    _ => return Err(KeyError::UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

/// One position on the scientific keypad: the key it carries normally and
/// the key it carries while the inverse toggle is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadSlot {
    pub primary: Key,
    pub inverse: Key,
}

impl PadSlot {
    const fn fixed(key: Key) -> Self {
        PadSlot { primary: key, inverse: key }
    }

    const fn toggled(primary: Function, inverse: Function) -> Self {
        PadSlot { primary: Key::Function(primary), inverse: Key::Function(inverse) }
    }

    pub fn key(&self, inverse_active: bool) -> Key {
        if inverse_active { self.inverse } else { self.primary }
    }
}

/// Scientific keypad, row by row. The standalone x² key keeps its label
/// when the √ slot flips to x².
pub const SCIENTIFIC_PAD: [PadSlot; 15] = [
    PadSlot::toggled(Function::Sin, Function::Asin),
    PadSlot::toggled(Function::Cos, Function::Acos),
    PadSlot::toggled(Function::Tan, Function::Atan),
    PadSlot::fixed(Key::Function(Function::Factorial)),
    PadSlot::fixed(Key::Pi),
    PadSlot::toggled(Function::Log10, Function::Pow10),
    PadSlot::toggled(Function::Ln, Function::Exp),
    PadSlot::toggled(Function::Sqrt, Function::Square),
    PadSlot::fixed(Key::Function(Function::Square)),
    PadSlot::fixed(Key::E),
    PadSlot { primary: Key::Power, inverse: Key::Root },
    PadSlot::fixed(Key::Function(Function::Reciprocal)),
    PadSlot::toggled(Function::Cbrt, Function::Cube),
    PadSlot::fixed(Key::Scientific),
    PadSlot::fixed(Key::Ans),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        let mut keys: Vec<Key> = (0..10).map(Key::Digit).collect();
        keys.extend(Function::ALL.iter().map(|f| Key::Function(*f)));
        keys.extend([
            Key::DoubleZero, Key::Point, Key::Add, Key::Subtract, Key::Multiply, Key::Divide,
            Key::OpenParen, Key::CloseParen, Key::Pi, Key::E, Key::Ans, Key::Power, Key::Root,
            Key::Scientific, Key::MemoryClear, Key::MemoryRecall, Key::MemoryAdd,
            Key::MemorySubtract, Key::MemoryStore, Key::Clear, Key::Backspace, Key::Equals,
            Key::Percent, Key::Negate, Key::AngleMode, Key::Inverse,
        ]);
        for key in keys {
            assert_eq!(key.label().parse::<Key>(), Ok(key), "{}", key);
        }
    }

    #[test]
    fn test_ascii_aliases() {
        assert_eq!("-".parse::<Key>(), Ok(Key::Subtract));
        assert_eq!("*".parse::<Key>(), Ok(Key::Multiply));
        assert_eq!("/".parse::<Key>(), Ok(Key::Divide));
        assert_eq!("sqrt".parse::<Key>(), Ok(Key::Function(Function::Sqrt)));
        assert_eq!("asin".parse::<Key>(), Ok(Key::Function(Function::Asin)));
        assert_eq!("M-".parse::<Key>(), Ok(Key::MemorySubtract));
        assert_eq!("back".parse::<Key>(), Ok(Key::Backspace));
        assert_eq!("enter".parse::<Key>(), Ok(Key::Equals));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!("12".parse::<Key>(), Err(KeyError::UnknownKey("12".to_string())));
        assert!("sinh".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn test_keyboard_bindings() {
        assert_eq!(Key::from_keyboard("7"), Some(Key::Digit(7)));
        assert_eq!(Key::from_keyboard("*"), Some(Key::Multiply));
        assert_eq!(Key::from_keyboard("/"), Some(Key::Divide));
        assert_eq!(Key::from_keyboard("-"), Some(Key::Subtract));
        assert_eq!(Key::from_keyboard("Return"), Some(Key::Equals));
        assert_eq!(Key::from_keyboard("BackSpace"), Some(Key::Backspace));
        assert_eq!(Key::from_keyboard("Escape"), Some(Key::Clear));
        assert_eq!(Key::from_keyboard("s"), None);
        assert_eq!(Key::from_keyboard("F1"), None);
    }

    #[test]
    fn test_pad_inverse_labels() {
        let normal: Vec<&str> = SCIENTIFIC_PAD.iter().map(|s| s.key(false).label()).collect();
        let inverse: Vec<&str> = SCIENTIFIC_PAD.iter().map(|s| s.key(true).label()).collect();
        assert_eq!(&normal[..8], &["sin", "cos", "tan", "x!", "π", "log", "ln", "√"]);
        assert_eq!(&inverse[..8], &["sin⁻¹", "cos⁻¹", "tan⁻¹", "x!", "π", "10ˣ", "eˣ", "x²"]);
        assert_eq!(inverse[8], "x²");
        assert_eq!(inverse[10], "ʸ√x");
        assert_eq!(inverse[12], "x³");
    }
}
