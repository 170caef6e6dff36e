//! Console loop

use crate::options::{load_settings, ConsoleOptions};
use services_calculator::{Calculator, CalculatorError};
use services_settings::{create_default_registry, keys, SettingValue};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Console error types
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error(transparent)]
    Calculator(#[from] CalculatorError),

    #[error("Snapshot encoding failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Result of one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank or `#` comment line
    Skipped,
    /// Rendered display after the line's keys
    Display(String),
    /// Engine snapshot as JSON
    Snapshot(String),
    Quit,
}

/// Line-oriented calculator host
pub struct Console {
    calculator: Calculator,
}

impl Console {
    pub fn new(calculator: Calculator) -> Self {
        Self { calculator }
    }

    /// Builds the calculator from the settings file (if any).
    ///
    /// `--trace` lowers the log level to `debug` so every key is recorded.
    pub fn from_options(options: &ConsoleOptions) -> ConsoleResult<Self> {
        let mut settings = match &options.settings_path {
            Some(path) => load_settings(path)?,
            None => create_default_registry(),
        };
        if options.trace {
            settings
                .set_override(keys::LOG_LEVEL, SettingValue::String("debug".to_string()))
                .map_err(|e| ConsoleError::Settings(e.to_string()))?;
        }

        let calculator =
            Calculator::with_settings(&settings).map_err(|e| ConsoleError::Settings(e.to_string()))?;
        Ok(Self::new(calculator))
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Executes one input line
    pub fn execute_line(&mut self, line: &str) -> ConsoleResult<LineOutcome> {
        let line = line.trim();
        match line {
            "" => Ok(LineOutcome::Skipped),
            _ if line.starts_with('#') => Ok(LineOutcome::Skipped),
            ":q" | "quit" => Ok(LineOutcome::Quit),
            ":snapshot" => {
                let json = serde_json::to_string(&self.calculator.snapshot())?;
                Ok(LineOutcome::Snapshot(json))
            }
            script => {
                self.calculator.run_script(script)?;
                Ok(LineOutcome::Display(self.calculator.display_text()))
            }
        }
    }

    /// Runs lines from `input` until end of input or quit.
    ///
    /// A line with an unknown character reports the error and keeps the keys
    /// applied before it; the loop continues with the next line.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> ConsoleResult<()> {
        for line in input.lines() {
            let line = line?;
            match self.execute_line(&line) {
                Ok(LineOutcome::Skipped) => {}
                Ok(LineOutcome::Display(text)) | Ok(LineOutcome::Snapshot(text)) => {
                    writeln!(output, "{}", text)?;
                }
                Ok(LineOutcome::Quit) => break,
                Err(ConsoleError::Calculator(err)) => {
                    writeln!(output, "error: {} (display {})", err, self.calculator.display_text())?;
                }
                Err(err) => return Err(err),
            }
        }
        output.flush()?;
        Ok(())
    }

    /// Writes the collected log, one entry per line
    pub fn write_trace<W: Write>(&self, output: &mut W) -> ConsoleResult<()> {
        for entry in self.calculator.log().entries() {
            writeln!(output, "{}", entry)?;
        }
        Ok(())
    }
}
