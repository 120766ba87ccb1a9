use thiserror::Error;

/// Why an expression was rejected. Only shows up in logs; the user always
/// sees the plain "Invalid expression" diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionFault {
    #[error("invalid character, '{0}', encountered")]
    invalid_character(char),

    #[error("two numbers are separated only by whitespace")]
    adjacent_numbers,

    #[error("'*' and '/' operators follow each other")]
    doubled_operator,

    #[error("parentheses are not balanced")]
    unbalanced_parens,

    #[error("could not find matching '('")]
    unmatched_right_paren,

    #[error("could not find matching ')'")]
    unclosed_left_paren,

    #[error("did not expect an operand here")]
    misplaced_operand,

    #[error("the '{0}' operator has been misplaced")]
    misplaced_operator(char),

    #[error("expression ended abruptly")]
    abrupt_end,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Unknown command")]
    unknown_command,

    #[error("Invalid expression")]
    invalid_expression(ExpressionFault),

    #[error("Invalid assignment")]
    invalid_assignment,

    #[error("Invalid identifier")]
    invalid_identifier,

    #[error("Unknown variable")]
    unknown_variable(String),

    #[error("Division by zero")]
    division_by_zero,

    #[error("Exponent is too large")]
    exponent_too_large,
}

impl From<ExpressionFault> for CalcError {
    fn from(fault: ExpressionFault) -> Self {
        CalcError::invalid_expression(fault)
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
