use crate::calculator::Calculator;
use std::io::{self, BufRead, Write};
use tracing::debug;

pub const HELP: &str = "\
Enter expression and I will calc it for you!
EXAMPLE: a = 5
EXAMPLE: -3 + a * ((4 + 3) * 2 + 1) - 6 / (2 + 1) ^ 2";

/// Reads commands from `input` until `/exit` or end of input. Results and
/// diagnostics go to `output`, one line each.
pub fn run<R: BufRead, W: Write>(input: R, output: &mut W) -> io::Result<()> {
    let mut calculator = Calculator::new();

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        match line {
            "" => continue,
            "/exit" => {
                writeln!(output, "Bye!")?;
                break;
            },
            "/help" => writeln!(output, "{}", HELP)?,
            _ => match calculator.process(line) {
                Ok(Some(result)) => writeln!(output, "{}", result)?,
                Ok(None) => {},
                Err(e) => {
                    debug!(%line, error = ?e, "rejected");
                    writeln!(output, "{}", e)?;
                },
            },
        }
        output.flush()?;
    }
    output.flush()
}
