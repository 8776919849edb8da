use std::fmt::Display;
use std::io::{BufRead, Write};
use crate::error::AtmError;

/// Line-oriented prompt/response over any reader and writer.
///
/// `main` hands in the locked stdin/stdout handles; dropping the console
/// releases them.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line
    pub fn say(&mut self, line: impl Display) -> Result<(), AtmError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    pub fn say_all(&mut self, lines: &[&str]) -> Result<(), AtmError> {
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    pub fn blank_line(&mut self) -> Result<(), AtmError> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Print `label` without a newline and read the answer line
    pub fn prompt(&mut self, label: &str) -> Result<String, AtmError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AtmError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn prompt_int(&mut self, label: &str) -> Result<i32, AtmError> {
        let answer = self.prompt(label)?;
        answer.trim().parse().map_err(|_| AtmError::InvalidNumber(answer))
    }

    /// Read a currency amount. `NaN` and infinities count as malformed.
    pub fn prompt_amount(&mut self, label: &str) -> Result<f64, AtmError> {
        let answer = self.prompt(label)?;
        match answer.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => Ok(amount),
            _ => Err(AtmError::InvalidNumber(answer)),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
