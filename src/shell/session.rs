//! Session
//!
//! Drives one interactive shell over a reader/writer pair.

use std::io::{BufRead, Write};

use crate::engine::{Engine, ExecuteOutcome};
use crate::error::{PageDbError, Result};
use crate::statement::{prepare, Input, MetaCommand};

/// Prompt printed before each line of input
pub const PROMPT: &str = "db > ";

/// Text printed by `.help`
pub const HELP_TEXT: &str = "\
Available commands:
\t.exit - Exit the program
\t.help - Show this help message
\tinsert <id> <username> <email> - Insert a new row
\tselect - Select all rows";

/// Handles a single shell session
///
/// Generic over its input and output so tests can drive it with in-memory
/// buffers.
pub struct Session<R, W> {
    /// Line source
    reader: R,

    /// Shell output
    writer: W,

    /// Table the session operates on; closed when the session ends
    engine: Engine,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a new session
    pub fn new(engine: Engine, reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            engine,
        }
    }

    /// Run the prompt loop until `.exit` or end of input
    ///
    /// The table is closed (and therefore flushed) on both. A fatal error
    /// ends the loop without closing; the error is returned to the caller.
    pub fn run(mut self) -> Result<()> {
        tracing::debug!("Session started");
        let mut buf = Vec::new();

        loop {
            self.print_prompt()?;

            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                tracing::debug!("End of input");
                break;
            }

            // A line that is not UTF-8 is a bad statement, not a broken stream
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    self.report(PageDbError::Syntax(format!("invalid UTF-8: {}", e)))?;
                    continue;
                }
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            tracing::trace!(input, "Received line");

            match prepare(input, self.engine.table().layout()) {
                Ok(Input::Meta(MetaCommand::Exit)) => break,
                Ok(Input::Meta(MetaCommand::Help)) => {
                    writeln!(self.writer, "{}", HELP_TEXT)?;
                }
                Ok(Input::Statement(statement)) => {
                    match self.engine.execute(statement) {
                        Ok(outcome) => self.write_outcome(&outcome)?,
                        Err(e) => self.report(e)?,
                    }
                }
                Err(e) => self.report(e)?,
            }
        }

        self.writer.flush()?;
        self.engine.close()?;
        tracing::debug!("Session closed");
        Ok(())
    }

    /// Write the output of a successful statement
    fn write_outcome(&mut self, outcome: &ExecuteOutcome) -> Result<()> {
        if let ExecuteOutcome::Selected(rows) = outcome {
            for row in rows {
                writeln!(self.writer, "{}", row)?;
            }
        }
        writeln!(self.writer, "Executed.")?;
        Ok(())
    }

    /// Print a user-facing error, or hand a fatal one back to the caller
    fn report(&mut self, error: PageDbError) -> Result<()> {
        if error.is_fatal() {
            tracing::error!("Fatal error: {}", error);
            // Best effort: the fatal error takes precedence over a failed flush
            let _ = self.writer.flush();
            return Err(error);
        }

        tracing::debug!("Statement rejected: {}", error);
        writeln!(self.writer, "{}", user_message(&error))?;
        Ok(())
    }

    fn print_prompt(&mut self) -> Result<()> {
        write!(self.writer, "{}", PROMPT)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Get the engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

/// Shell wording for recoverable errors
pub fn user_message(error: &PageDbError) -> String {
    match error {
        PageDbError::TableFull => "Error: Table full.".to_string(),
        PageDbError::StringTooLong { .. } => "String is too long.".to_string(),
        PageDbError::NegativeId => "ID must be positive.".to_string(),
        PageDbError::Syntax(_) => "Syntax error. Could not parse statement.".to_string(),
        PageDbError::UnrecognizedStatement(line) => {
            format!("Unrecognized keyword at start of '{}'.", line)
        }
        PageDbError::UnrecognizedMetaCommand(line) => format!("Unrecognized command '{}'.", line),
        other => format!("Error: {}.", other),
    }
}
