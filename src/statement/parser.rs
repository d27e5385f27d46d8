//! Statement preparation
//!
//! Turns one line of input into an [`Input`], validating row fields against
//! the table's column widths.
//!
//! ## Grammar
//! ```text
//! .exit
//! .help
//! select
//! insert <id> <username> <email>
//! ```

use crate::error::{PageDbError, Result};
use crate::row::{Row, RowLayout};

use super::{Input, MetaCommand, Statement};

const INSERT_KEYWORD: &str = "insert";
const SELECT_KEYWORD: &str = "select";

/// Parse a line of shell input
///
/// The line is expected without its trailing newline. Surrounding whitespace
/// is ignored.
pub fn prepare(line: &str, layout: &RowLayout) -> Result<Input> {
    let line = line.trim();

    if line.starts_with('.') {
        return parse_meta_command(line).map(Input::Meta);
    }

    prepare_statement(line, layout).map(Input::Statement)
}

/// Parse a meta-command (a line starting with `.`)
pub fn parse_meta_command(line: &str) -> Result<MetaCommand> {
    match line {
        ".exit" => Ok(MetaCommand::Exit),
        ".help" => Ok(MetaCommand::Help),
        _ => Err(PageDbError::UnrecognizedMetaCommand(line.to_string())),
    }
}

/// Parse a statement (`insert ...` or `select`)
pub fn prepare_statement(line: &str, layout: &RowLayout) -> Result<Statement> {
    if line == SELECT_KEYWORD {
        return Ok(Statement::Select);
    }

    if line.starts_with(INSERT_KEYWORD) {
        return prepare_insert(line, layout);
    }

    Err(PageDbError::UnrecognizedStatement(line.to_string()))
}

fn prepare_insert(line: &str, layout: &RowLayout) -> Result<Statement> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let [keyword, id, username, email] = tokens[..] else {
        return Err(PageDbError::Syntax(format!(
            "expected `insert <id> <username> <email>`, got {} tokens",
            tokens.len()
        )));
    };

    if keyword != INSERT_KEYWORD {
        return Err(PageDbError::UnrecognizedStatement(line.to_string()));
    }

    let id = parse_id(id)?;

    if username.len() > layout.username_size() {
        return Err(PageDbError::StringTooLong {
            field: "username",
            max: layout.username_size(),
        });
    }
    if email.len() > layout.email_size() {
        return Err(PageDbError::StringTooLong {
            field: "email",
            max: layout.email_size(),
        });
    }

    Ok(Statement::Insert(Row::new(id, username, email)))
}

/// Range-check an id token into a `u32`
fn parse_id(token: &str) -> Result<u32> {
    let value: i64 = token
        .parse()
        .map_err(|_| PageDbError::Syntax(format!("id `{}` is not a number", token)))?;

    if value < 0 {
        return Err(PageDbError::NegativeId);
    }

    u32::try_from(value)
        .map_err(|_| PageDbError::Syntax(format!("id {} is larger than {}", value, u32::MAX)))
}
