//! Statement Module
//!
//! Parsing of shell input into meta-commands and statements.
//!
//! ### Meta-commands
//! - `.exit`: flush the table and quit
//! - `.help`: list the available commands
//!
//! ### Statements
//! - `insert <id> <username> <email>`: append one row
//! - `select`: print every row
//!
//! ### Validation
//! - id must be a non-negative integer that fits in 32 bits
//! - username and email must fit their column widths

mod command;
mod parser;

pub use command::{Input, MetaCommand, Statement};
pub use parser::{parse_meta_command, prepare, prepare_statement};
