//! Arithmetic expression parser and evaluator.
//!
//! Expressions are evaluated by an explicit tokenizer and recursive-descent
//! parser, never by a general-purpose code evaluator. The only names an
//! expression can reach are the fixed function and constant tables below;
//! everything else is rejected before evaluation.
//!
//! Grammar (highest binding last):
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := unary (("*" | "/" | "%") unary)*
//! unary   := "-" unary | power
//! power   := primary (("**" | "^") unary)?     // right-associative
//! primary := number | ident | ident "(" expr ("," expr)* ")" | "(" expr ")"
//! ```

use thiserror::Error;

/// Errors produced while lexing, parsing, or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The expression contained no tokens.
    #[error("empty expression")]
    Empty,

    /// A character outside the expression grammar.
    #[error("unexpected character '{0}' in expression")]
    UnexpectedChar(char),

    /// A numeric literal that does not parse as a number.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// An identifier outside the allow-listed functions and constants.
    #[error("name '{0}' is not defined")]
    UnknownName(String),

    /// A function called with the wrong number of arguments.
    #[error("{name}() expects {expected} argument(s), got {got}")]
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },

    /// The expression ended where a value or operator was required.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A token that cannot start or continue the current production.
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),

    /// Leftover tokens after a complete expression was parsed.
    #[error("unexpected input after expression")]
    TrailingInput,

    /// An unbalanced opening parenthesis.
    #[error("missing closing parenthesis")]
    MissingParen,

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Modulo by zero.
    #[error("modulo by zero")]
    ModuloByZero,

    /// The evaluated result is NaN or infinite.
    #[error("Invalid result")]
    NonFinite,
}

/// Token types for the expression parser.
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Power,
    LParen,
    RParen,
    Comma,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::Power => "**".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
        }
    }
}

/// Evaluate an arithmetic expression string.
///
/// The result is guaranteed finite; NaN and infinity (e.g. from `1/0` or
/// `log(-1)`) are rejected as [`EvalError::NonFinite`].
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut pos = 0;
    let value = parse_expr(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(EvalError::TrailingInput);
    }

    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Lexer: convert an expression string into tokens.
fn lex(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        num_str.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let n = num_str
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(num_str.clone()))?;
                tokens.push(Token::Number(n));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            '+' => {
                tokens.push(Token::Plus);
                chars.next();
            }
            '-' => {
                tokens.push(Token::Minus);
                chars.next();
            }
            '*' => {
                chars.next();
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::Power);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '^' => {
                tokens.push(Token::Power);
                chars.next();
            }
            '/' => {
                tokens.push(Token::Slash);
                chars.next();
            }
            '%' => {
                tokens.push(Token::Percent);
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            ',' => {
                tokens.push(Token::Comma);
                chars.next();
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

/// Parse addition/subtraction level.
fn parse_expr(tokens: &[Token], pos: &mut usize) -> Result<f64, EvalError> {
    let mut left = parse_term(tokens, pos)?;
    while *pos < tokens.len() {
        match &tokens[*pos] {
            Token::Plus => {
                *pos += 1;
                left += parse_term(tokens, pos)?;
            }
            Token::Minus => {
                *pos += 1;
                left -= parse_term(tokens, pos)?;
            }
            _ => break,
        }
    }
    Ok(left)
}

/// Parse multiplication/division/modulo level.
fn parse_term(tokens: &[Token], pos: &mut usize) -> Result<f64, EvalError> {
    let mut left = parse_unary(tokens, pos)?;
    while *pos < tokens.len() {
        match &tokens[*pos] {
            Token::Star => {
                *pos += 1;
                left *= parse_unary(tokens, pos)?;
            }
            Token::Slash => {
                *pos += 1;
                let right = parse_unary(tokens, pos)?;
                if right == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                left /= right;
            }
            Token::Percent => {
                *pos += 1;
                let right = parse_unary(tokens, pos)?;
                if right == 0.0 {
                    return Err(EvalError::ModuloByZero);
                }
                left %= right;
            }
            _ => break,
        }
    }
    Ok(left)
}

/// Parse unary minus.
fn parse_unary(tokens: &[Token], pos: &mut usize) -> Result<f64, EvalError> {
    if *pos < tokens.len() && tokens[*pos] == Token::Minus {
        *pos += 1;
        let val = parse_unary(tokens, pos)?;
        return Ok(-val);
    }
    parse_power(tokens, pos)
}

/// Parse exponentiation (right-associative, binds tighter than unary minus
/// on its left: `-2 ** 2` is `-4`).
fn parse_power(tokens: &[Token], pos: &mut usize) -> Result<f64, EvalError> {
    let base = parse_primary(tokens, pos)?;
    if *pos < tokens.len() && tokens[*pos] == Token::Power {
        *pos += 1;
        let exponent = parse_unary(tokens, pos)?;
        return Ok(base.powf(exponent));
    }
    Ok(base)
}

/// Parse primary: number, constant, function call, or parenthesized
/// expression.
fn parse_primary(tokens: &[Token], pos: &mut usize) -> Result<f64, EvalError> {
    let Some(token) = tokens.get(*pos) else {
        return Err(EvalError::UnexpectedEnd);
    };

    match token {
        Token::Number(n) => {
            let val = *n;
            *pos += 1;
            Ok(val)
        }
        Token::Ident(name) => {
            let name = name.clone();
            *pos += 1;
            if tokens.get(*pos) == Some(&Token::LParen) {
                *pos += 1;
                let args = parse_args(tokens, pos)?;
                apply_function(&name, &args)
            } else {
                constant(&name)
            }
        }
        Token::LParen => {
            *pos += 1;
            let val = parse_expr(tokens, pos)?;
            if tokens.get(*pos) != Some(&Token::RParen) {
                return Err(EvalError::MissingParen);
            }
            *pos += 1;
            Ok(val)
        }
        other => Err(EvalError::UnexpectedToken(other.describe())),
    }
}

/// Parse a comma-separated argument list up to the closing parenthesis.
/// The opening parenthesis has already been consumed.
fn parse_args(tokens: &[Token], pos: &mut usize) -> Result<Vec<f64>, EvalError> {
    let mut args = Vec::new();

    if tokens.get(*pos) == Some(&Token::RParen) {
        *pos += 1;
        return Ok(args);
    }

    loop {
        args.push(parse_expr(tokens, pos)?);
        match tokens.get(*pos) {
            Some(Token::Comma) => {
                *pos += 1;
            }
            Some(Token::RParen) => {
                *pos += 1;
                return Ok(args);
            }
            Some(other) => return Err(EvalError::UnexpectedToken(other.describe())),
            None => return Err(EvalError::MissingParen),
        }
    }
}

/// The closed constant table. Nothing outside it is reachable.
fn constant(name: &str) -> Result<f64, EvalError> {
    match name {
        "pi" => Ok(std::f64::consts::PI),
        "e" => Ok(std::f64::consts::E),
        _ => Err(EvalError::UnknownName(name.to_string())),
    }
}

/// The closed function table. Nothing outside it is reachable.
fn apply_function(name: &str, args: &[f64]) -> Result<f64, EvalError> {
    match name {
        "abs" => Ok(one_arg(name, args)?.abs()),
        "round" => Ok(one_arg(name, args)?.round()),
        "sqrt" => Ok(one_arg(name, args)?.sqrt()),
        "sin" => Ok(one_arg(name, args)?.sin()),
        "cos" => Ok(one_arg(name, args)?.cos()),
        "tan" => Ok(one_arg(name, args)?.tan()),
        "log" => Ok(one_arg(name, args)?.ln()),
        "exp" => Ok(one_arg(name, args)?.exp()),
        "pow" => {
            let (base, exponent) = two_args(name, args)?;
            Ok(base.powf(exponent))
        }
        _ => Err(EvalError::UnknownName(name.to_string())),
    }
}

fn one_arg(name: &str, args: &[f64]) -> Result<f64, EvalError> {
    match args {
        [value] => Ok(*value),
        _ => Err(EvalError::WrongArity {
            name: name.to_string(),
            expected: 1,
            got: args.len(),
        }),
    }
}

fn two_args(name: &str, args: &[f64]) -> Result<(f64, f64), EvalError> {
    match args {
        [a, b] => Ok((*a, *b)),
        _ => Err(EvalError::WrongArity {
            name: name.to_string(),
            expected: 2,
            got: args.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_basic_addition() {
        assert_eq!(evaluate("2 + 3").unwrap(), 5.0);
    }

    #[test]
    fn eval_operator_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
    }

    #[test]
    fn eval_parentheses() {
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn eval_modulo() {
        assert_eq!(evaluate("10 % 3").unwrap(), 1.0);
    }

    #[test]
    fn eval_unary_minus() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
    }

    #[test]
    fn eval_nested_parens() {
        assert_eq!(evaluate("((2 + 3) * (4 - 1))").unwrap(), 15.0);
    }

    #[test]
    fn eval_power_right_associative() {
        assert_eq!(evaluate("2 ** 3 ** 2").unwrap(), 512.0);
        assert_eq!(evaluate("2 ^ 10").unwrap(), 1024.0);
    }

    #[test]
    fn eval_power_binds_tighter_than_unary_minus() {
        assert_eq!(evaluate("-2 ** 2").unwrap(), -4.0);
        assert_eq!(evaluate("2 ** -1").unwrap(), 0.5);
    }

    #[test]
    fn eval_functions() {
        assert_eq!(evaluate("sqrt(16)").unwrap(), 4.0);
        assert_eq!(evaluate("abs(-7)").unwrap(), 7.0);
        assert_eq!(evaluate("round(2.6)").unwrap(), 3.0);
        assert_eq!(evaluate("pow(2, 10)").unwrap(), 1024.0);
        assert!((evaluate("exp(1)").unwrap() - std::f64::consts::E).abs() < 1e-12);
        assert!((evaluate("log(e)").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn eval_constants() {
        assert_eq!(evaluate("pi").unwrap(), std::f64::consts::PI);
        assert!((evaluate("sin(pi / 2)").unwrap() - 1.0).abs() < 1e-12);
        assert!((evaluate("cos(0)").unwrap() - 1.0).abs() < 1e-12);
        assert!(evaluate("tan(0)").unwrap().abs() < 1e-12);
    }

    #[test]
    fn eval_division_by_zero() {
        assert_eq!(evaluate("1 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("5 % 0"), Err(EvalError::ModuloByZero));
    }

    #[test]
    fn eval_non_finite_result() {
        assert_eq!(evaluate("log(-1)"), Err(EvalError::NonFinite));
        assert_eq!(evaluate("exp(10000)"), Err(EvalError::NonFinite));
    }

    #[test]
    fn eval_unknown_name_rejected() {
        assert_eq!(
            evaluate("__import__('os')"),
            Err(EvalError::UnexpectedChar('\''))
        );
        assert_eq!(
            evaluate("__import__(1)"),
            Err(EvalError::UnknownName("__import__".to_string()))
        );
        assert_eq!(
            evaluate("open(1)"),
            Err(EvalError::UnknownName("open".to_string()))
        );
        assert_eq!(
            evaluate("tau"),
            Err(EvalError::UnknownName("tau".to_string()))
        );
    }

    #[test]
    fn eval_wrong_arity() {
        assert_eq!(
            evaluate("sqrt(1, 2)"),
            Err(EvalError::WrongArity {
                name: "sqrt".to_string(),
                expected: 1,
                got: 2,
            })
        );
        assert_eq!(
            evaluate("pow(2)"),
            Err(EvalError::WrongArity {
                name: "pow".to_string(),
                expected: 2,
                got: 1,
            })
        );
    }

    #[test]
    fn eval_empty_expression() {
        assert_eq!(evaluate(""), Err(EvalError::Empty));
        assert_eq!(evaluate("   "), Err(EvalError::Empty));
    }

    #[test]
    fn eval_syntax_errors() {
        assert!(matches!(
            evaluate("3 * * 4"),
            Err(EvalError::UnexpectedToken(_))
        ));
        assert_eq!(evaluate("(2 + 3"), Err(EvalError::MissingParen));
        assert_eq!(evaluate("2 +"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("2 3"), Err(EvalError::TrailingInput));
        assert_eq!(evaluate("1.2.3"), Err(EvalError::InvalidNumber("1.2.3".to_string())));
    }

    #[test]
    fn eval_decimals() {
        let result = evaluate("1.5 + 2.5").unwrap();
        assert!((result - 4.0).abs() < f64::EPSILON);
    }
}
