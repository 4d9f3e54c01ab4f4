//! Unary calculator functions and angle modes

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tally_core::TallyError;

use crate::eval::{check_finite, EvalError};

/// Largest n whose factorial is a finite f64
const MAX_FACTORIAL: f64 = 170.0;

/// Unit trig functions read and inverse trig functions return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleMode {
    #[default]
    #[serde(rename = "DEG")]
    Degrees,
    #[serde(rename = "RAD")]
    Radians,
    #[serde(rename = "GRAD")]
    Gradians,
}

impl AngleMode {
    /// DEG → RAD → GRAD → DEG
    pub fn next(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Gradians,
            AngleMode::Gradians => AngleMode::Degrees,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Degrees => "DEG",
            AngleMode::Radians => "RAD",
            AngleMode::Gradians => "GRAD",
        }
    }

    pub fn to_radians(self, x: f64) -> f64 {
        match self {
            AngleMode::Degrees => x.to_radians(),
            AngleMode::Radians => x,
            AngleMode::Gradians => x * std::f64::consts::PI / 200.0,
        }
    }

    pub fn from_radians(self, x: f64) -> f64 {
        match self {
            AngleMode::Degrees => x.to_degrees(),
            AngleMode::Radians => x,
            AngleMode::Gradians => x * 200.0 / std::f64::consts::PI,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AngleMode {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deg" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radians" => Ok(AngleMode::Radians),
            "grad" | "gradians" => Ok(AngleMode::Gradians),
            _ => Err(TallyError::invalid_input(format!("unknown angle mode '{}'", s))
                .with_input(s)
                .with_suggestion("Use deg, rad or grad")),
        }
    }
}

/// A function key that consumes the current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log10,
    Pow10,
    Ln,
    Exp,
    Sqrt,
    Square,
    Cbrt,
    Cube,
    Reciprocal,
    Factorial,
}

impl Function {
    pub const ALL: [Function; 16] = [
        Function::Sin, Function::Cos, Function::Tan,
        Function::Asin, Function::Acos, Function::Atan,
        Function::Log10, Function::Pow10, Function::Ln, Function::Exp,
        Function::Sqrt, Function::Square, Function::Cbrt, Function::Cube,
        Function::Reciprocal, Function::Factorial,
    ];

    /// Key label, also the name shown around the input (`sin(30)`)
    pub fn label(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "sin⁻¹",
            Function::Acos => "cos⁻¹",
            Function::Atan => "tan⁻¹",
            Function::Log10 => "log",
            Function::Pow10 => "10ˣ",
            Function::Ln => "ln",
            Function::Exp => "eˣ",
            Function::Sqrt => "√",
            Function::Square => "x²",
            Function::Cbrt => "∛",
            Function::Cube => "x³",
            Function::Reciprocal => "1/x",
            Function::Factorial => "x!",
        }
    }

    /// The function the inverse toggle swaps in
    pub fn inverse(self) -> Option<Function> {
        match self {
            Function::Sin => Some(Function::Asin),
            Function::Asin => Some(Function::Sin),
            Function::Cos => Some(Function::Acos),
            Function::Acos => Some(Function::Cos),
            Function::Tan => Some(Function::Atan),
            Function::Atan => Some(Function::Tan),
            Function::Log10 => Some(Function::Pow10),
            Function::Pow10 => Some(Function::Log10),
            Function::Ln => Some(Function::Exp),
            Function::Exp => Some(Function::Ln),
            Function::Sqrt => Some(Function::Square),
            Function::Square => Some(Function::Sqrt),
            Function::Cbrt => Some(Function::Cube),
            Function::Cube => Some(Function::Cbrt),
            Function::Reciprocal | Function::Factorial => None,
        }
    }

    /// Apply to `x`; trig reads and inverse trig returns angles in `mode`
    pub fn apply(self, x: f64, mode: AngleMode) -> Result<f64, EvalError> {
        let result = match self {
            Function::Sin => mode.to_radians(x).sin(),
            Function::Cos => mode.to_radians(x).cos(),
            Function::Tan => mode.to_radians(x).tan(),
            Function::Asin => mode.from_radians(unit_interval(x, "sin⁻¹")?.asin()),
            Function::Acos => mode.from_radians(unit_interval(x, "cos⁻¹")?.acos()),
            Function::Atan => mode.from_radians(x.atan()),
            Function::Log10 => positive(x, "log")?.log10(),
            Function::Pow10 => 10f64.powf(x),
            Function::Ln => positive(x, "ln")?.ln(),
            Function::Exp => x.exp(),
            Function::Sqrt => {
                if x < 0.0 {
                    return Err(EvalError::Domain(format!("√ of negative {}", x)));
                }
                x.sqrt()
            }
            Function::Square => x * x,
            Function::Cbrt => x.cbrt(),
            Function::Cube => x * x * x,
            Function::Reciprocal => {
                if x == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                1.0 / x
            }
            Function::Factorial => factorial(x)?,
        };
        check_finite(result)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn unit_interval(x: f64, name: &str) -> Result<f64, EvalError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(EvalError::Domain(format!("{} needs -1 ≤ x ≤ 1, got {}", name, x)));
    }
    Ok(x)
}

fn positive(x: f64, name: &str) -> Result<f64, EvalError> {
    if x <= 0.0 {
        return Err(EvalError::Domain(format!("{} needs x > 0, got {}", name, x)));
    }
    Ok(x)
}

/// Factorial of `x` truncated toward zero
fn factorial(x: f64) -> Result<f64, EvalError> {
    let n = x.trunc();
    if n < 0.0 {
        return Err(EvalError::Domain(format!("factorial of negative {}", n)));
    }
    if n > MAX_FACTORIAL {
        return Err(EvalError::Overflow);
    }
    Ok((2..=n as u32).fold(1.0, |acc, k| acc * k as f64))
}
