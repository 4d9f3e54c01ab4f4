//! Calculator state machine
//!
//! The expression is a sequence of entries, each carrying its arithmetic
//! text and its display text. The string handed to the evaluator and the
//! string shown on screen are both concatenations of that sequence, so
//! they never drift apart and backspace always removes one visible unit.

use serde::Serialize;
use tally_core::format_number;
use tracing::{debug, trace};

use crate::eval::{evaluate, EvalError};
use crate::functions::{AngleMode, Function};
use crate::keys::{Key, SCIENTIFIC_PAD};

/// The three lines the calculator shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    /// `M=<value>`, empty while memory is clear
    pub memory: String,
    /// The expression being typed, or the function applied last
    pub expression: String,
    /// Live result, final result or "Error"
    pub result: String,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            memory: String::new(),
            expression: String::new(),
            result: "0".to_string(),
        }
    }
}

/// Everything a view needs to draw the calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub screen: Screen,
    pub angle_mode: AngleMode,
    pub inverse: bool,
    /// Scientific keypad labels for the active inverse direction
    pub pad: Vec<&'static str>,
    pub memory_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_result: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    raw: String,
    display: String,
    operator: bool,
}

impl Entry {
    fn operand(raw: impl Into<String>, display: impl Into<String>) -> Self {
        Self { raw: raw.into(), display: display.into(), operator: false }
    }

    fn operator(raw: &str, display: &str) -> Self {
        Self { raw: raw.to_string(), display: display.to_string(), operator: true }
    }

    fn char(c: char) -> Self {
        Self::operand(c.to_string(), c.to_string())
    }

    /// Entries spelling out a formatted number. Signs, including the one
    /// inside an exponent, stay replaceable by the next binary operator.
    fn number(text: &str) -> Vec<Entry> {
        text.chars()
            .map(|c| Entry { operator: matches!(c, '+' | '-'), ..Entry::char(c) })
            .collect()
    }
}

/// Scientific calculator driven by key presses
#[derive(Debug, Clone)]
pub struct Calculator {
    entries: Vec<Entry>,
    memory: f64,
    last_result: Option<f64>,
    angle_mode: AngleMode,
    inverse: bool,
    screen: Screen,
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            memory: 0.0,
            last_result: None,
            angle_mode: AngleMode::default(),
            inverse: false,
            screen: Screen::default(),
        }
    }

    pub fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Arithmetic text handed to the evaluator
    pub fn expression(&self) -> String {
        self.entries.iter().map(|e| e.raw.as_str()).collect()
    }

    /// The expression as shown (`12×3`)
    pub fn display_text(&self) -> String {
        self.entries.iter().map(|e| e.display.as_str()).collect()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn inverse_active(&self) -> bool {
        self.inverse
    }

    /// Scientific keypad labels for the active inverse direction
    pub fn pad_labels(&self) -> Vec<&'static str> {
        SCIENTIFIC_PAD.iter().map(|slot| slot.key(self.inverse).label()).collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            screen: self.screen.clone(),
            angle_mode: self.angle_mode,
            inverse: self.inverse,
            pad: self.pad_labels(),
            memory_value: self.memory,
            last_result: self.last_result,
        }
    }

    /// Handle one key press. Failures never escape: they show as "Error".
    pub fn press(&mut self, key: Key) -> &Screen {
        trace!(key = %key, "press");
        if let Err(err) = self.handle(key) {
            self.show_error(&err);
        }
        &self.screen
    }

    fn handle(&mut self, key: Key) -> Result<(), EvalError> {
        match key {
            Key::MemoryClear => {
                self.memory = 0.0;
                self.screen.memory.clear();
            }
            Key::MemoryRecall => self.recall_memory(),
            Key::MemoryAdd | Key::MemorySubtract | Key::MemoryStore => self.update_memory(key),

            Key::Clear => {
                self.entries.clear();
                self.screen.expression.clear();
                self.screen.result = "0".to_string();
            }
            Key::Backspace => {
                self.entries.pop();
                self.screen.expression = self.display_text();
                self.live_eval();
            }

            Key::Equals => {
                if let Some(value) = self.current_value()? {
                    self.screen.expression.clear();
                    self.screen.result = format_number(value);
                    self.last_result = Some(value);
                    self.replace_with(value);
                }
            }

            Key::Pi => self.append(Entry::operand("pi", "π")),
            Key::E => self.append(Entry::operand("e", "e")),
            Key::Ans => {
                if let Some(value) = self.last_result {
                    self.append(Entry::operand(value.to_string(), "Ans"));
                }
            }

            Key::Function(f) => self.apply_function(f)?,

            Key::Negate => self.transform(|v| -v)?,
            Key::Percent => self.transform(|v| v / 100.0)?,

            Key::AngleMode => self.angle_mode = self.angle_mode.next(),
            Key::Inverse => self.inverse = !self.inverse,

            Key::Digit(d) => {
                if let Some(c) = char::from_digit(u32::from(d), 10) {
                    self.append(Entry::char(c));
                }
            }
            Key::DoubleZero => {
                self.entries.push(Entry::char('0'));
                self.append(Entry::char('0'));
            }
            Key::Point => self.append(Entry::char('.')),
            Key::OpenParen => self.append(Entry::char('(')),
            Key::CloseParen => self.append(Entry::char(')')),

            Key::Add => self.append_operator(key, "+", "+"),
            Key::Subtract => self.append_operator(key, "-", "−"),
            Key::Multiply => self.append_operator(key, "*", "×"),
            Key::Divide => self.append_operator(key, "/", "÷"),
            Key::Power => self.append_operator(key, "**", "^"),
            Key::Root => self.append(Entry::operator("**(1/", "^(1/")),
            Key::Scientific => self.append(Entry::operator("*10**", "E")),
        }
        Ok(())
    }

    fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.screen.expression = self.display_text();
        self.live_eval();
    }

    /// Digits of the memory value, one entry per character, unless the
    /// shown form loses precision; then the full value is a single entry
    fn recall_memory(&mut self) {
        let memory = self.memory;
        let shown = format_number(memory);
        if shown.parse::<f64>() == Ok(memory) {
            self.entries.extend(Entry::number(&shown));
            self.screen.expression = self.display_text();
            self.live_eval();
        } else {
            self.append(Entry::operand(memory.to_string(), shown));
        }
    }

    /// Binary operators replace a trailing operator rather than stack
    fn append_operator(&mut self, key: Key, raw: &str, display: &str) {
        debug_assert!(key.is_binary_operator());
        if self.entries.last().is_some_and(|e| e.operator) {
            self.entries.pop();
        }
        self.append(Entry::operator(raw, display));
    }

    /// Update the result line if the expression currently evaluates
    fn live_eval(&mut self) {
        if let Ok(Some(value)) = self.current_value() {
            self.screen.result = format_number(value);
        }
    }

    /// Value of the expression; `None` while it is empty
    fn current_value(&self) -> Result<Option<f64>, EvalError> {
        let expression = self.expression();
        if expression.trim().is_empty() {
            return Ok(None);
        }
        evaluate(&expression).map(Some)
    }

    /// MS, M+ and M− do nothing unless the expression evaluates
    fn update_memory(&mut self, key: Key) {
        let Ok(Some(value)) = self.current_value() else {
            return;
        };
        let memory = match key {
            Key::MemoryStore => value,
            Key::MemoryAdd => self.memory + value,
            _ => self.memory - value,
        };
        if !memory.is_finite() {
            return;
        }
        self.memory = memory;
        self.screen.memory = format!("M={}", format_number(memory));
    }

    fn apply_function(&mut self, f: Function) -> Result<(), EvalError> {
        let Some(value) = self.current_value()? else {
            return Ok(());
        };
        let result = f.apply(value, self.angle_mode)?;
        self.screen.expression = format!("{}({})", f.label(), format_number(value));
        self.screen.result = format_number(result);
        self.last_result = Some(result);
        self.replace_with(result);
        Ok(())
    }

    /// Negate and percent: the expression becomes the transformed value
    fn transform(&mut self, op: impl Fn(f64) -> f64) -> Result<(), EvalError> {
        let Some(value) = self.current_value()? else {
            return Ok(());
        };
        let result = op(value);
        self.replace_with(result);
        self.screen.expression = self.display_text();
        self.screen.result = format_number(result);
        Ok(())
    }

    /// Restart the expression from a value, one entry per character
    fn replace_with(&mut self, value: f64) {
        self.entries = Entry::number(&format_number(value));
    }

    fn show_error(&mut self, err: &EvalError) {
        debug!(error = %err, expression = %self.expression(), "evaluation surfaced an error");
        self.screen.result = "Error".to_string();
        self.screen.expression = err.to_string();
        self.entries.clear();
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(calc: &mut Calculator, labels: &[&str]) {
        for label in labels {
            let key: Key = label.parse().unwrap();
            calc.press(key);
        }
    }

    fn run(labels: &[&str]) -> Calculator {
        let mut calc = Calculator::new();
        press_all(&mut calc, labels);
        calc
    }

    #[test]
    fn test_simple_sum() {
        let calc = run(&["2", "+", "3", "="]);
        assert_eq!(calc.screen().result, "5");
        assert_eq!(calc.screen().expression, "");
        assert_eq!(calc.last_result(), Some(5.0));
        assert_eq!(calc.expression(), "5");
    }

    #[test]
    fn test_live_preview() {
        let mut calc = Calculator::new();
        press_all(&mut calc, &["1", "2", "×", "3"]);
        assert_eq!(calc.screen().expression, "12×3");
        assert_eq!(calc.screen().result, "36");
        assert_eq!(calc.expression(), "12*3");
    }

    #[test]
    fn test_operator_replaces_trailing_operator() {
        let calc = run(&["+", "+", "4"]);
        assert_eq!(calc.display_text(), "+4");
        assert_eq!(calc.expression(), "+4");

        let calc = run(&["2", "+", "×", "÷", "4", "="]);
        assert_eq!(calc.screen().result, "0.5");
    }

    #[test]
    fn test_operator_replaces_power_tokens() {
        let calc = run(&["2", "xʸ", "+"]);
        assert_eq!(calc.display_text(), "2+");
        let calc = run(&["2", "ʸ√x", "×"]);
        assert_eq!(calc.expression(), "2*");
        let calc = run(&["2", "EXP", "−"]);
        assert_eq!(calc.display_text(), "2−");
    }

    #[test]
    fn test_backspace_removes_one_unit() {
        let mut calc = run(&["1", "2", "×"]);
        calc.press(Key::Backspace);
        assert_eq!(calc.display_text(), "12");
        assert_eq!(calc.expression(), "12");
        assert_eq!(calc.screen().expression, "12");

        let mut calc = run(&["2", "ʸ√x"]);
        assert_eq!(calc.expression(), "2**(1/");
        calc.press(Key::Backspace);
        assert_eq!(calc.expression(), "2");

        let mut calc = run(&["3", "π"]);
        calc.press(Key::Backspace);
        assert_eq!(calc.display_text(), "3");
    }

    #[test]
    fn test_backspace_on_empty() {
        let mut calc = Calculator::new();
        calc.press(Key::Backspace);
        assert_eq!(calc.screen().result, "0");
        assert_eq!(calc.display_text(), "");
    }

    #[test]
    fn test_division_by_zero_surfaces_only_on_equals() {
        let mut calc = run(&["5", "/"]);
        assert_eq!(calc.screen().result, "5");
        assert_eq!(calc.screen().expression, "5÷");

        press_all(&mut calc, &["0"]);
        assert_eq!(calc.screen().result, "5");

        press_all(&mut calc, &["="]);
        assert_eq!(calc.screen().result, "Error");
        assert_eq!(calc.screen().expression, "Division by zero");
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_syntax_error_on_equals() {
        let calc = run(&["5", "+", "="]);
        assert_eq!(calc.screen().result, "Error");
        assert!(calc.screen().expression.starts_with("Syntax Error"));
        assert_eq!(calc.display_text(), "");
    }

    #[test]
    fn test_equals_on_empty_does_nothing() {
        let calc = run(&["="]);
        assert_eq!(calc.screen(), &Screen::default());
        assert_eq!(calc.last_result(), None);
    }

    #[test]
    fn test_memory() {
        let mut calc = run(&["1", "0", "MS"]);
        assert_eq!(calc.screen().memory, "M=10");
        press_all(&mut calc, &["C", "5", "M+", "C", "MR"]);
        assert_eq!(calc.memory(), 15.0);
        assert_eq!(calc.display_text(), "15");
        assert_eq!(calc.screen().result, "15");

        press_all(&mut calc, &["C", "2", "0", "M−"]);
        assert_eq!(calc.screen().memory, "M=-5");
        press_all(&mut calc, &["MC"]);
        assert_eq!(calc.memory(), 0.0);
        assert_eq!(calc.screen().memory, "");
    }

    #[test]
    fn test_memory_ops_ignore_bad_expressions() {
        let mut calc = run(&["4", "MS", "C", "5", "÷", "0", "M+"]);
        assert_eq!(calc.memory(), 4.0);
        assert_eq!(calc.screen().result, "5");
        press_all(&mut calc, &["C", "MS"]);
        assert_eq!(calc.memory(), 4.0);
    }

    #[test]
    fn test_recall_keeps_full_precision() {
        let mut calc = run(&["1", "÷", "3", "MS", "C", "MR", "×", "3", "="]);
        assert_eq!(calc.screen().result, "1");
        press_all(&mut calc, &["C", "MR"]);
        assert_eq!(calc.display_text(), "0.3333333333");
    }

    #[test]
    fn test_backspace_after_recall_drops_one_digit() {
        let mut calc = run(&["1", "5", "MS", "C", "MR"]);
        assert_eq!(calc.display_text(), "15");
        press_all(&mut calc, &["⌫"]);
        assert_eq!(calc.display_text(), "1");
        assert_eq!(calc.expression(), "1");

        // 1/3 cannot be spelled exactly, so it stays one glyph
        let mut calc = run(&["1", "÷", "3", "MS", "C", "MR", "⌫"]);
        assert_eq!(calc.display_text(), "");
    }

    #[test]
    fn test_clear() {
        let calc = run(&["9", "×", "9", "C"]);
        assert_eq!(calc.screen().result, "0");
        assert_eq!(calc.screen().expression, "");
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_percent_and_negate() {
        let calc = run(&["5", "0", "%"]);
        assert_eq!(calc.screen().result, "0.5");
        assert_eq!(calc.screen().expression, "0.5");

        let calc = run(&["7", "±", "+", "2", "="]);
        assert_eq!(calc.screen().result, "-5");

        let calc = run(&["5", "÷", "0", "±"]);
        assert_eq!(calc.screen().result, "Error");
    }

    #[test]
    fn test_sign_of_flattened_result_is_replaceable() {
        let calc = run(&["5", "±", "⌫", "+", "4"]);
        assert_eq!(calc.display_text(), "+4");
        assert_eq!(calc.expression(), "+4");
        assert_eq!(calc.screen().result, "4");

        let calc = run(&["5", "±", "⌫", "×"]);
        assert_eq!(calc.expression(), "*");

        let calc = run(&["2", "−", "8", "=", "⌫", "+", "9", "="]);
        assert_eq!(calc.screen().result, "9");
    }

    #[test]
    fn test_exponent_sign_is_replaceable() {
        let mut calc = run(&["1", "÷", "1", "0", "0", "0", "0", "0", "="]);
        assert_eq!(calc.expression(), "1e-05");
        press_all(&mut calc, &["⌫", "⌫", "+"]);
        assert_eq!(calc.expression(), "1e+");
        press_all(&mut calc, &["0", "5"]);
        assert_eq!(calc.screen().result, "100000");
    }

    #[test]
    fn test_unary_function() {
        let calc = run(&["3", "0", "sin"]);
        assert_eq!(calc.screen().expression, "sin(30)");
        assert_eq!(calc.screen().result, "0.5");
        assert_eq!(calc.display_text(), "0.5");
        assert!((calc.last_result().unwrap() - 0.5).abs() < 1e-12);

        let calc = run(&["2", "+", "2", "x²"]);
        assert_eq!(calc.screen().expression, "x²(4)");
        assert_eq!(calc.screen().result, "16");

        let calc = run(&["5", "x!"]);
        assert_eq!(calc.screen().result, "120");
    }

    #[test]
    fn test_unary_on_empty_does_nothing() {
        let calc = run(&["sin"]);
        assert_eq!(calc.screen(), &Screen::default());
    }

    #[test]
    fn test_unary_domain_errors() {
        let cases: [&[&str]; 4] = [&["0", "1/x"], &["1", "−", "2", "√"], &["0", "log"], &["2", "sin⁻¹"]];
        for labels in cases {
            let calc = run(labels);
            assert_eq!(calc.screen().result, "Error", "{:?}", labels);
            assert_eq!(calc.expression(), "");
        }
    }

    #[test]
    fn test_angle_modes() {
        let mut calc = Calculator::new();
        assert_eq!(calc.angle_mode(), AngleMode::Degrees);
        press_all(&mut calc, &["DRG", "DRG"]);
        assert_eq!(calc.angle_mode(), AngleMode::Gradians);
        press_all(&mut calc, &["1", "0", "0", "sin"]);
        assert_eq!(calc.screen().result, "1");

        let mut calc = Calculator::new().with_angle_mode(AngleMode::Radians);
        press_all(&mut calc, &["1", "tan⁻¹", "×", "4", "="]);
        assert_eq!(calc.screen().result, "3.141592654");

        let mut calc = run(&["DRG", "DRG", "DRG"]);
        assert_eq!(calc.angle_mode(), AngleMode::Degrees);
        press_all(&mut calc, &["0", ".", "5", "sin⁻¹"]);
        assert_eq!(calc.screen().result, "30");
    }

    #[test]
    fn test_inverse_toggle_relabels_pad() {
        let mut calc = Calculator::new();
        assert_eq!(calc.pad_labels()[0], "sin");
        calc.press(Key::Inverse);
        assert!(calc.inverse_active());
        let labels = calc.pad_labels();
        assert_eq!(labels[0], "sin⁻¹");
        assert_eq!(labels[5], "10ˣ");
        assert_eq!(labels[7], "x²");
        assert_eq!(labels[10], "ʸ√x");
        calc.press(Key::Inverse);
        assert_eq!(calc.pad_labels()[5], "log");
    }

    #[test]
    fn test_constants_and_ans() {
        let calc = run(&["π", "="]);
        assert_eq!(calc.screen().result, "3.141592654");

        let calc = run(&["2", "+", "3", "=", "×", "Ans", "="]);
        assert_eq!(calc.screen().result, "25");

        let calc = run(&["7", "Ans"]);
        assert_eq!(calc.display_text(), "7");
    }

    #[test]
    fn test_power_root_and_exp_keys() {
        let calc = run(&["2", "xʸ", "1", "0", "="]);
        assert_eq!(calc.screen().result, "1024");

        let calc = run(&["2", "7", "ʸ√x", "3", ")", "="]);
        assert_eq!(calc.screen().result, "3");

        let mut calc = run(&["1", ".", "5", "EXP", "3"]);
        assert_eq!(calc.display_text(), "1.5E3");
        press_all(&mut calc, &["="]);
        assert_eq!(calc.screen().result, "1500");
    }

    #[test]
    fn test_double_zero() {
        let mut calc = run(&["5", "00"]);
        assert_eq!(calc.display_text(), "500");
        calc.press(Key::Backspace);
        assert_eq!(calc.display_text(), "50");

        let calc = run(&["0", "5", "="]);
        assert_eq!(calc.screen().result, "5");
        assert_eq!(calc.screen().expression, "");
    }

    #[test]
    fn test_disallowed_identifier_is_an_error() {
        let calc = run(&["π", "2", "="]);
        assert_eq!(calc.screen().result, "Error");
        assert!(calc.screen().expression.contains("pi2"));
    }

    #[test]
    fn test_result_continues_expression() {
        let calc = run(&["6", "×", "7", "=", "−", "2", "="]);
        assert_eq!(calc.screen().result, "40");
    }

    #[test]
    fn test_snapshot_serializes_flat() {
        let calc = run(&["1", "+", "1"]);
        let snap = calc.snapshot();
        assert_eq!(snap.screen.result, "2");
        assert_eq!(snap.angle_mode, AngleMode::Degrees);
        assert_eq!(snap.pad.len(), 15);
    }
}
