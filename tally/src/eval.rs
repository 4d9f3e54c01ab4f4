//! Expression evaluator

use thiserror::Error;
use tally_core::TallyError;

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::parser;

/// Why an expression or function produced no value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Syntax Error: {0}")]
    Syntax(String),

    #[error("Name not allowed: {0}")]
    UnknownIdentifier(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Math domain error: {0}")]
    Domain(String),

    #[error("Result too large")]
    Overflow,
}

impl From<EvalError> for TallyError {
    fn from(err: EvalError) -> Self {
        let message = err.to_string();
        match err {
            EvalError::Syntax(_) => TallyError::evaluation(message),
            EvalError::UnknownIdentifier(name) => TallyError::evaluation(message)
                .with_input(name)
                .with_suggestion("Only pi and e may be named"),
            EvalError::DivisionByZero => TallyError::div_zero(),
            EvalError::Domain(details) => TallyError::domain_error(details),
            EvalError::Overflow => TallyError::overflow(),
        }
    }
}

/// Parse and evaluate an arithmetic string
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    eval_expr(&parser::parse(input)?)
}

/// Evaluate a parsed expression. Every intermediate value is finite.
pub fn eval_expr(expr: &Expr) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Constant(c) => Ok(c.value()),
        Expr::UnaryOp(op, operand) => {
            let value = eval_expr(operand)?;
            Ok(match op {
                UnaryOp::Neg => -value,
                UnaryOp::Plus => value,
            })
        }
        Expr::BinaryOp(left, op, right) => {
            let l = eval_expr(left)?;
            let r = eval_expr(right)?;
            eval_binary(l, *op, r)
        }
    }
}

fn eval_binary(l: f64, op: BinOp, r: f64) -> Result<f64, EvalError> {
    let result = match op {
        BinOp::Add => l + r,
        BinOp::Sub => l - r,
        BinOp::Mul => l * r,
        BinOp::Div => {
            if r == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            l / r
        }
        BinOp::Pow => {
            if l == 0.0 && r < 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            if l < 0.0 && r.fract() != 0.0 {
                return Err(EvalError::Domain(format!("{} ** {} is not real", l, r)));
            }
            l.powf(r)
        }
    };
    check_finite(result)
}

/// Reject infinities and NaN produced by an operation
pub(crate) fn check_finite(value: f64) -> Result<f64, EvalError> {
    if value.is_nan() {
        Err(EvalError::Domain("result is not a number".to_string()))
    } else if value.is_infinite() {
        Err(EvalError::Overflow)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::codes;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(evaluate("2+3"), Ok(5.0));
        assert_eq!(evaluate("7/2"), Ok(3.5));
        assert_eq!(evaluate("2*(3+4)"), Ok(14.0));
        assert_eq!(evaluate("10-4-3"), Ok(3.0));
        assert_eq!(evaluate("2*-3"), Ok(-6.0));
        assert_eq!(evaluate("+5"), Ok(5.0));
    }

    #[test]
    fn test_powers() {
        assert_eq!(evaluate("2**10"), Ok(1024.0));
        assert_eq!(evaluate("-2**2"), Ok(-4.0));
        assert_eq!(evaluate("2**-1"), Ok(0.5));
        assert_eq!(evaluate("2**3**2"), Ok(512.0));
        assert!(approx(evaluate("27**(1/3)").unwrap(), 3.0));
        assert_eq!(evaluate("1.5*10**3"), Ok(1500.0));
    }

    #[test]
    fn test_constants() {
        assert_eq!(evaluate("pi"), Ok(std::f64::consts::PI));
        assert_eq!(evaluate("2*e"), Ok(2.0 * std::f64::consts::E));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("1/(2-2)"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("0**-1"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_non_finite_results() {
        assert_eq!(evaluate("10**400"), Err(EvalError::Overflow));
        assert!(matches!(evaluate("(-8)**(1/3)"), Err(EvalError::Domain(_))));
    }

    #[test]
    fn test_error_codes() {
        let err: TallyError = evaluate("5/0").unwrap_err().into();
        assert_eq!(err.code, codes::DIV_ZERO);
        let err: TallyError = evaluate("abs(1)").unwrap_err().into();
        assert_eq!(err.code, codes::EVAL_ERROR);
        let err: TallyError = evaluate("5+").unwrap_err().into();
        assert_eq!(err.code, codes::EVAL_ERROR);
    }
}
