//! Line-oriented estimator session.
//!
//! Reads one command per line and prints the result panel after every
//! change, so the estimate follows each edit the way the web calculator did.
//!
//! ```text
//! set <field> <value>   choose an option or move a slider
//! clear <field>         unset a choice (or restore a slider default)
//! reset                 start over
//! show                  print the parameters and the result
//! options               list every option
//! help                  list commands
//! quit                  leave the session
//! ```

use std::io::{BufRead, Write};

use anyhow::Result;
use estimate_core::{CurrencyFormat, EstimatorForm, FormError, FormField, PricingEngine};
use thiserror::Error;
use tracing::{debug, warn};

use crate::render::{FormPanel, OptionsPanel, ResultPanel};

const HELP: &str = "\
Commands:
  set <field> <value>   fields: type, area, floors, materials, timeline
  clear <field>
  reset
  show
  options
  help
  quit";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Form(#[from] FormError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FormField, String),
    Clear(FormField),
    Reset,
    Show,
    Options,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (Some(field), Some(value)) = (words.next(), words.next()) else {
                    return Err(CommandError::Usage("set <field> <value>"));
                };
                Self::Set(parse_field(field)?, value.to_string())
            }
            "clear" => {
                let Some(field) = words.next() else {
                    return Err(CommandError::Usage("clear <field>"));
                };
                Self::Clear(parse_field(field)?)
            }
            "reset" => Self::Reset,
            "show" => Self::Show,
            "options" => Self::Options,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_field(name: &str) -> Result<FormField, CommandError> {
    FormField::parse(name).ok_or_else(|| FormError::UnknownField(name.to_string()).into())
}

/// A form plus the engine that prices it.
pub struct Session<'a> {
    form: EstimatorForm,
    engine: PricingEngine<'a>,
    currency: CurrencyFormat,
}

impl<'a> Session<'a> {
    pub fn new(
        engine: PricingEngine<'a>,
        currency: CurrencyFormat,
    ) -> Self {
        Self {
            form: EstimatorForm::new(),
            engine,
            currency,
        }
    }

    pub fn form(&self) -> &EstimatorForm {
        &self.form
    }

    /// Applies a command and returns the text to print, or `None` on quit.
    pub fn handle(
        &mut self,
        command: Command,
    ) -> Result<Option<String>, CommandError> {
        debug!(?command, "session command");
        let output = match command {
            Command::Set(field, value) => {
                self.form.apply(field, &value)?;
                self.result_panel()
            }
            Command::Clear(field) => {
                self.form.clear(field);
                self.result_panel()
            }
            Command::Reset => {
                self.form.reset();
                self.result_panel()
            }
            Command::Show => format!("{}\n{}", FormPanel(&self.form), self.result_panel()),
            Command::Options => OptionsPanel {
                engine: &self.engine,
                currency: &self.currency,
            }
            .to_string(),
            Command::Help => format!("{HELP}\n"),
            Command::Quit => return Ok(None),
        };
        Ok(Some(output))
    }

    fn result_panel(&self) -> String {
        ResultPanel {
            view: &self.form.view(&self.engine),
            currency: &self.currency,
        }
        .to_string()
    }

    /// Runs commands from `input` until end of input or `quit`.
    ///
    /// Rejected commands are reported on `output` and the session continues.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(error) => {
                    warn!(%error, "rejected session input");
                    writeln!(output, "error: {error}")?;
                    continue;
                }
            };

            match self.handle(command) {
                Ok(Some(text)) => write!(output, "{text}")?,
                Ok(None) => break,
                Err(error) => writeln!(output, "error: {error}")?,
            }
            output.flush()?;
        }
        Ok(())
    }
}
