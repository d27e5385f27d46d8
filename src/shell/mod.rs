//! Shell Module
//!
//! Line-oriented command shell over an engine.
//!
//! ## Architecture
//! - One session per process
//! - Each line is prepared into a meta-command or a statement
//! - Statements routed through Engine
//! - `.exit` or end of input closes the table

mod session;

pub use session::{user_message, Session, HELP_TEXT, PROMPT};
