use crate::error_handling::*;
use crate::parsing::*;
use crate::scanning::*;
use crate::variables::*;
use num_bigint::BigInt;
use tracing::debug;

/// What a valid input line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    assign_number { name: String, value: BigInt },
    assign_variable { name: String, source: String },
    show_variable(String),
    show_number(String),
    evaluate(Vec<ExprNode>),
}

/// `[+-]?[0-9]+`
pub fn parse_literal(s: &str) -> Option<BigInt> {
    let digits = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(s.as_bytes(), 10)
}

fn is_allowed(character: char) -> bool {
    character.is_ascii_alphanumeric()
        || character.is_whitespace()
        || matches!(character, '-' | '+' | '*' | '/' | '^' | '(' | ')')
}

fn has_adjacent_numbers(line: &str) -> bool {
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if !c.is_ascii_digit() {
            continue;
        }
        let mut gap = false;
        while chars.next_if(|c| c.is_whitespace()).is_some() {
            gap = true;
        }
        if gap && matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            return true;
        }
    }
    false
}

fn has_doubled_operator(line: &str) -> bool {
    let compact: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .windows(2)
        .any(|pair| matches!(pair[0], '*' | '/') && matches!(pair[1], '*' | '/'))
}

fn check_characters(line: &str) -> Result<()> {
    if let Some(character) = line.chars().find(|&c| !is_allowed(c)) {
        return Err(ExpressionFault::invalid_character(character).into());
    }
    if has_adjacent_numbers(line) {
        return Err(ExpressionFault::adjacent_numbers.into());
    }
    if has_doubled_operator(line) {
        return Err(ExpressionFault::doubled_operator.into());
    }
    Ok(())
}

/// Classifies `a = ...` lines. Whitespace is ignored throughout, as it is
/// in expressions. Nothing is assigned here.
pub fn validate_assignment(line: &str, variables: &Variables) -> Result<Command> {
    let line: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let sides: Vec<&str> = line.split('=').collect();
    let [name, value] = sides[..] else {
        return Err(CalcError::invalid_assignment);
    };
    if !is_identifier(name) {
        return Err(CalcError::invalid_identifier);
    }
    if let Some(value) = parse_literal(value) {
        return Ok(Command::assign_number{name: name.into(), value});
    }
    if !is_identifier(value) {
        return Err(CalcError::invalid_identifier);
    }
    if !variables.contains(value) {
        return Err(CalcError::unknown_variable(value.into()));
    }
    Ok(Command::assign_variable{name: name.into(), source: value.into()})
}

/// Classifies one input line. The first matching rule wins.
pub fn validate(line: &str, variables: &Variables) -> Result<Command> {
    let line = line.trim();

    if line.starts_with('/') {
        return Err(CalcError::unknown_command);
    }
    if parse_literal(line).is_some() {
        return Ok(Command::show_number(line.into()));
    }
    if line.contains('=') {
        return validate_assignment(line, variables);
    }
    check_characters(line)?;
    if is_identifier(line) {
        return if variables.contains(line) {
            Ok(Command::show_variable(line.into()))
        } else {
            Err(CalcError::unknown_variable(line.into()))
        };
    }
    if line.matches('(').count() != line.matches(')').count() {
        return Err(ExpressionFault::unbalanced_parens.into());
    }

    let tokens = normalize(line, variables)?;
    let expression = parse(SimpleScanner::new(tokens), variables)?;
    debug!(%line, steps = expression.len(), "expression accepted");
    Ok(Command::evaluate(expression))
}
