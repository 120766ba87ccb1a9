#![allow(nonstandard_style)]

//! Interactive integer calculator with arbitrary precision, variables and
//! the usual infix operators.

pub mod calculator;
pub mod error_handling;
pub mod evaluating;
pub mod parsing;
pub mod repl;
pub mod scanning;
pub mod validating;
pub mod variables;

pub use calculator::Calculator;
pub use error_handling::{CalcError, ExpressionFault, Result};
pub use validating::Command;
pub use variables::Variables;
