//! Tally - Scientific calculator and converter grid

mod ast;
mod parser;
mod eval;
mod functions;
mod keys;
mod calculator;

pub use ast::{Expr, BinOp, UnaryOp, Constant};
pub use parser::parse;
pub use eval::{evaluate, eval_expr, EvalError};
pub use functions::{AngleMode, Function};
pub use keys::{Key, KeyError, PadSlot, SCIENTIFIC_PAD};
pub use calculator::{Calculator, Screen, Snapshot};

use chrono::NaiveDate;
use tally_core::TallyError;
use tally_plugin::{ConvertContext, ConverterMeta, ConverterRegistry, Fields};
use tracing::debug;

/// Registry holding every unit page and scalar calculator
pub fn standard_registry() -> ConverterRegistry {
    let registry = tally_units::load_units_library(ConverterRegistry::new());
    tally_scalar::load_scalar_library(registry)
}

/// Main Tally engine: one calculator and the converter pages
pub struct Tally {
    calculator: Calculator,
    registry: ConverterRegistry,
    context: ConvertContext,
}

impl Tally {
    pub fn new(registry: ConverterRegistry) -> Self {
        Self {
            calculator: Calculator::new(),
            registry,
            context: ConvertContext::new(),
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(standard_registry())
    }

    pub fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.calculator = self.calculator.with_angle_mode(mode);
        self
    }

    /// Pin the date age calculations count up to
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.context = self.context.with_today(today);
        self
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn press(&mut self, key: Key) -> &Screen {
        self.calculator.press(key)
    }

    /// Press the key with this label
    pub fn press_label(&mut self, label: &str) -> Result<&Screen, TallyError> {
        let key: Key = label.parse()?;
        Ok(self.calculator.press(key))
    }

    /// Press the key bound to a keyboard key; unbound keys are ignored
    pub fn keyboard(&mut self, name: &str) -> &Screen {
        match Key::from_keyboard(name) {
            Some(key) => self.calculator.press(key),
            None => {
                debug!(key = name, "unbound keyboard key");
                self.calculator.screen()
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.calculator.snapshot()
    }

    pub fn converters(&self) -> Vec<ConverterMeta> {
        self.registry.list()
    }

    pub fn populate(&self, name: &str) -> Result<Fields, TallyError> {
        self.registry.populate(name)
    }

    pub fn calculate(&self, name: &str, fields: &Fields) -> Result<String, TallyError> {
        self.registry.calculate(name, fields, &self.context)
    }
}

impl Default for Tally {
    fn default() -> Self {
        Self::with_standard_library()
    }
}
