//! Command definitions
//!
//! Represents one parsed line of shell input.

use crate::row::Row;

/// Shell-level commands, written with a leading `.`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    /// Flush the table and leave the shell
    Exit,

    /// Print the list of available commands
    Help,
}

/// Statements executed against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Append a row
    Insert(Row),

    /// Read back every row in insertion order
    Select,
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Meta(MetaCommand),
    Statement(Statement),
}
