use crate::error_handling::*;
use crate::evaluating::*;
use crate::validating::*;
use crate::variables::Variables;

/// A calculator session. Owns the variable table; every line is validated
/// against it and only a successful command may change it.
#[derive(Debug, Default)]
pub struct Calculator {
    variables: Variables,
}

impl Calculator {
    pub fn new() -> Self {
        Self{variables: Variables::new()}
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn validate(&self, line: &str) -> Result<Command> {
        validate(line, &self.variables)
    }

    /// Runs a validated command, returning the line to print, if any.
    pub fn execute(&mut self, command: Command) -> Result<Option<String>> {
        match command {
            Command::assign_number{name, value} => {
                self.variables.set(name, value);
                Ok(None)
            },
            Command::assign_variable{name, source} => {
                let value = self
                    .variables
                    .get(&source)
                    .cloned()
                    .ok_or(CalcError::unknown_variable(source))?;
                self.variables.set(name, value);
                Ok(None)
            },
            Command::show_variable(name) => {
                let value = self
                    .variables
                    .get(&name)
                    .ok_or_else(|| CalcError::unknown_variable(name.clone()))?;
                Ok(Some(value.to_string()))
            },
            Command::show_number(text) => Ok(Some(text)),
            Command::evaluate(expression) => Ok(Some(evaluate(&expression)?.to_string())),
        }
    }

    pub fn process(&mut self, line: &str) -> Result<Option<String>> {
        let command = self.validate(line)?;
        self.execute(command)
    }
}
