//! Arithmetic expression parser
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr           := additive
//! additive       := multiplicative (('+' | '-') multiplicative)*
//! multiplicative := unary (('*' | '/') unary)*
//! unary          := ('+' | '-') unary | power
//! power          := primary ('**' unary)?
//! primary        := number | constant | '(' expr ')'
//! ```
//!
//! `**` binds tighter than a leading sign and associates to the right, so
//! `-2**2` is -4 and `2**3**2` is 512.

use crate::ast::{BinOp, Constant, Expr, UnaryOp};
use crate::eval::EvalError;

/// Nesting beyond this is rejected instead of recursing further
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    StarStar,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Ident(name) => format!("'{}'", name),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::StarStar => "'**'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

/// Parse an arithmetic string to AST
pub fn parse(input: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Syntax("empty expression".to_string()));
    }

    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let expr = parser.parse_additive()?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(EvalError::Syntax(format!("unexpected {}", tok.describe()))),
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => { tokens.push(Token::Plus); i += 1; }
            '-' => { tokens.push(Token::Minus); i += 1; }
            '/' => { tokens.push(Token::Slash); i += 1; }
            '(' => { tokens.push(Token::LParen); i += 1; }
            ')' => { tokens.push(Token::RParen); i += 1; }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::StarStar);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '0'..='9' | '.' => {
                let (number, next) = lex_number(&chars, i)?;
                tokens.push(Token::Number(number));
                i = next;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => return Err(EvalError::Syntax(format!("unexpected character '{}'", other))),
        }
    }

    Ok(tokens)
}

/// Lex a decimal literal starting at `start`: digits, an optional fraction
/// and an optional exponent (`1.5e+20`). Returns the value and the index
/// just past it.
fn lex_number(chars: &[char], start: usize) -> Result<(f64, usize), EvalError> {
    let mut i = start;
    let mut digits = 0;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return Err(EvalError::Syntax("unexpected '.'".to_string()));
    }

    // The exponent only counts when a digit follows, otherwise `e` is left
    // for the next token
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let text: String = chars[start..i].iter().collect();
    let value = text.parse::<f64>()
        .map_err(|_| EvalError::Syntax(format!("invalid number '{}'", text)))?;
    if !value.is_finite() {
        return Err(EvalError::Overflow);
    }
    Ok((value, i))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp(Box::new(left), op, Box::new(right));
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Expr::BinaryOp(Box::new(left), op, Box::new(right));
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            _ => return self.parse_power(),
        };
        self.pos += 1;
        self.descend()?;
        let operand = self.parse_unary();
        self.depth -= 1;
        Ok(Expr::UnaryOp(op, Box::new(operand?)))
    }

    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_primary()?;
        if !self.eat(&Token::StarStar) {
            return Ok(base);
        }
        self.descend()?;
        let exponent = self.parse_unary();
        self.depth -= 1;
        Ok(Expr::BinaryOp(Box::new(base), BinOp::Pow, Box::new(exponent?)))
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    return Err(EvalError::UnknownIdentifier(format!("{}()", name)));
                }
                Constant::lookup(&name)
                    .map(Expr::Constant)
                    .ok_or(EvalError::UnknownIdentifier(name))
            }
            Some(Token::LParen) => {
                self.descend()?;
                let inner = self.parse_additive();
                self.depth -= 1;
                let inner = inner?;
                if !self.eat(&Token::RParen) {
                    return Err(EvalError::Syntax("missing ')'".to_string()));
                }
                Ok(inner)
            }
            Some(tok) => Err(EvalError::Syntax(format!("unexpected {}", tok.describe()))),
            None => Err(EvalError::Syntax("unexpected end of expression".to_string())),
        }
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::Syntax("expression nested too deeply".to_string()));
        }
        self.depth += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Number(n))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("1+2*3").unwrap(),
            Expr::BinaryOp(num(1.0), BinOp::Add, Box::new(Expr::BinaryOp(num(2.0), BinOp::Mul, num(3.0))))
        );
    }

    #[test]
    fn test_power_binds_tighter_than_sign() {
        assert_eq!(
            parse("-2**2").unwrap(),
            Expr::UnaryOp(UnaryOp::Neg, Box::new(Expr::BinaryOp(num(2.0), BinOp::Pow, num(2.0))))
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            parse("2**3**2").unwrap(),
            Expr::BinaryOp(num(2.0), BinOp::Pow, Box::new(Expr::BinaryOp(num(3.0), BinOp::Pow, num(2.0))))
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse("1.5e+20").unwrap(), Expr::Number(1.5e20));
        assert_eq!(parse("2.5e-3").unwrap(), Expr::Number(0.0025));
        assert_eq!(parse(".5").unwrap(), Expr::Number(0.5));
        assert_eq!(parse("5.").unwrap(), Expr::Number(5.0));
    }

    #[test]
    fn test_leading_zeros_are_accepted() {
        // Typed zeros before a digit read as decimal, never octal
        assert_eq!(parse("007").unwrap(), Expr::Number(7.0));
        assert_eq!(parse("05+010").unwrap(), Expr::BinaryOp(num(5.0), BinOp::Add, num(10.0)));
        assert_eq!(parse("1e-05").unwrap(), Expr::Number(1e-5));
    }

    #[test]
    fn test_constants() {
        assert_eq!(parse("pi").unwrap(), Expr::Constant(Constant::Pi));
        assert_eq!(
            parse("2*e").unwrap(),
            Expr::BinaryOp(num(2.0), BinOp::Mul, Box::new(Expr::Constant(Constant::E)))
        );
        // `e` not followed by a digit is the constant, not an exponent
        assert!(matches!(parse("2e"), Err(EvalError::Syntax(_))));
    }

    #[test]
    fn test_disallowed_identifiers() {
        assert_eq!(parse("x+1"), Err(EvalError::UnknownIdentifier("x".to_string())));
        assert_eq!(parse("pi2"), Err(EvalError::UnknownIdentifier("pi2".to_string())));
        assert_eq!(
            parse("sqrt(4)"),
            Err(EvalError::UnknownIdentifier("sqrt()".to_string()))
        );
        assert!(parse("__import__").is_err());
    }

    #[test]
    fn test_syntax_errors() {
        for bad in ["", "5+", "5*/2", "(1+2", "1+2)", "2(3)", "1.2.3", ".", "3 $ 4", "**2"] {
            assert!(matches!(parse(bad), Err(EvalError::Syntax(_))), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        assert!(parse(&deep).is_err());
        let fine = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(parse(&fine).unwrap(), Expr::Number(1.0));
    }
}
