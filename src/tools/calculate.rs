//! calculate tool - sandboxed arithmetic expression evaluator
//!
//! A recursive-descent parser over `+ - * / % ^`, parentheses, unary minus,
//! numeric literals, the constants `pi` and `e`, and a fixed allow-list of
//! math functions. Input that does not resolve to a numeric expression is
//! rejected; nothing here executes host code.

use async_trait::async_trait;
use eyre::{bail, eyre};
use serde_json::Value;

use super::{ParamSpec, ParamType, ParameterSchema, Tool, ToolContext};

pub struct CalculateTool;

#[async_trait]
impl Tool for CalculateTool {
    fn name(&self) -> &'static str {
        "calculate"
    }

    fn description(&self) -> &'static str {
        "Evaluate an arithmetic expression (+ - * / % ^, parentheses, sqrt/pow and other math functions)."
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::new(vec![
            ParamSpec::required("expression", ParamType::String)
                .describe("Math expression, e.g. 2 + 3 * 4"),
        ])
    }

    async fn execute(&self, args: &Value, _ctx: &ToolContext) -> Result<String, eyre::Error> {
        let expression = args["expression"]
            .as_str()
            .ok_or_else(|| eyre!("expression is required"))?;

        let result = evaluate(expression)?;
        Ok(format!("{} = {}", expression, format_number(result)))
    }
}

/// Format a result: integral values print without a fractional part
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
}

/// Lexer: convert an expression string into tokens
fn lex(input: &str) -> Result<Vec<Token>, eyre::Error> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut num = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        num.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = num
                    .parse::<f64>()
                    .map_err(|_| eyre!("invalid number '{}'", num))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident.to_lowercase()));
            }
            '+' => { tokens.push(Token::Plus); chars.next(); }
            '-' => { tokens.push(Token::Minus); chars.next(); }
            '*' => { tokens.push(Token::Star); chars.next(); }
            '/' => { tokens.push(Token::Slash); chars.next(); }
            '%' => { tokens.push(Token::Percent); chars.next(); }
            '^' => { tokens.push(Token::Caret); chars.next(); }
            '(' => { tokens.push(Token::LParen); chars.next(); }
            ')' => { tokens.push(Token::RParen); chars.next(); }
            ',' => { tokens.push(Token::Comma); chars.next(); }
            other => bail!("unexpected character '{}'", other),
        }
    }

    Ok(tokens)
}

/// Evaluate an arithmetic expression string
pub fn evaluate(input: &str) -> Result<f64, eyre::Error> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        bail!("empty expression");
    }

    let mut pos = 0;
    let result = parse_expr(&tokens, &mut pos)?;
    if pos != tokens.len() {
        bail!("unexpected tokens after expression");
    }
    Ok(result)
}

/// Addition/subtraction level
fn parse_expr(tokens: &[Token], pos: &mut usize) -> Result<f64, eyre::Error> {
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

/// Multiplication/division/modulo level
fn parse_term(tokens: &[Token], pos: &mut usize) -> Result<f64, eyre::Error> {
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
                    bail!("division by zero");
                }
                left /= right;
            }
            Token::Percent => {
                *pos += 1;
                let right = parse_unary(tokens, pos)?;
                if right == 0.0 {
                    bail!("modulo by zero");
                }
                left %= right;
            }
            _ => break,
        }
    }
    Ok(left)
}

/// Unary minus, binding looser than `^`
fn parse_unary(tokens: &[Token], pos: &mut usize) -> Result<f64, eyre::Error> {
    if *pos < tokens.len() && tokens[*pos] == Token::Minus {
        *pos += 1;
        let value = parse_unary(tokens, pos)?;
        return Ok(-value);
    }
    parse_power(tokens, pos)
}

/// Exponentiation level, right-associative
fn parse_power(tokens: &[Token], pos: &mut usize) -> Result<f64, eyre::Error> {
    let base = parse_primary(tokens, pos)?;
    if *pos < tokens.len() && tokens[*pos] == Token::Caret {
        *pos += 1;
        let exponent = parse_unary(tokens, pos)?;
        return Ok(base.powf(exponent));
    }
    Ok(base)
}

/// Number, constant, function call, or parenthesized expression
fn parse_primary(tokens: &[Token], pos: &mut usize) -> Result<f64, eyre::Error> {
    let Some(token) = tokens.get(*pos) else {
        bail!("unexpected end of expression");
    };

    match token {
        Token::Number(n) => {
            let value = *n;
            *pos += 1;
            Ok(value)
        }
        Token::LParen => {
            *pos += 1;
            let value = parse_expr(tokens, pos)?;
            if tokens.get(*pos) != Some(&Token::RParen) {
                bail!("missing closing parenthesis");
            }
            *pos += 1;
            Ok(value)
        }
        Token::Ident(name) => {
            let name = name.clone();
            *pos += 1;
            if tokens.get(*pos) == Some(&Token::LParen) {
                *pos += 1;
                let args = parse_call_args(tokens, pos)?;
                apply_function(&name, &args)
            } else {
                match name.as_str() {
                    "pi" => Ok(std::f64::consts::PI),
                    "e" => Ok(std::f64::consts::E),
                    other => bail!("unknown constant '{}'", other),
                }
            }
        }
        other => bail!("unexpected token {:?}", other),
    }
}

/// Comma-separated argument list, closing parenthesis consumed
fn parse_call_args(tokens: &[Token], pos: &mut usize) -> Result<Vec<f64>, eyre::Error> {
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
            _ => bail!("missing closing parenthesis in function call"),
        }
    }
}

/// Apply an allow-listed math function
fn apply_function(name: &str, args: &[f64]) -> Result<f64, eyre::Error> {
    let unary = |args: &[f64]| -> Result<f64, eyre::Error> {
        match args {
            [x] => Ok(*x),
            _ => bail!("{} expects exactly one argument", name),
        }
    };

    match name {
        "sqrt" => {
            let x = unary(args)?;
            if x < 0.0 {
                bail!("sqrt of negative number");
            }
            Ok(x.sqrt())
        }
        "abs" => Ok(unary(args)?.abs()),
        "floor" => Ok(unary(args)?.floor()),
        "ceil" => Ok(unary(args)?.ceil()),
        "round" => Ok(unary(args)?.round()),
        "sin" => Ok(unary(args)?.sin()),
        "cos" => Ok(unary(args)?.cos()),
        "tan" => Ok(unary(args)?.tan()),
        "ln" => {
            let x = unary(args)?;
            if x <= 0.0 {
                bail!("ln of non-positive number");
            }
            Ok(x.ln())
        }
        "log" => {
            let x = unary(args)?;
            if x <= 0.0 {
                bail!("log of non-positive number");
            }
            Ok(x.log10())
        }
        "exp" => Ok(unary(args)?.exp()),
        "pow" => match args {
            [base, exp] => Ok(base.powf(*exp)),
            _ => bail!("pow expects exactly two arguments"),
        },
        "min" => match args {
            [a, b] => Ok(a.min(*b)),
            _ => bail!("min expects exactly two arguments"),
        },
        "max" => match args {
            [a, b] => Ok(a.max(*b)),
            _ => bail!("max expects exactly two arguments"),
        },
        other => bail!("unknown function '{}'", other),
    }
}
