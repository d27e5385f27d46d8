//! Row Module
//!
//! The fixed-schema record stored by a table.
//!
//! ## Record Format
//! ```text
//! ┌──────────┬───────────────┬──────────────────────────────┐
//! │ id (4)   │ username (32) │         email (256)          │
//! │ u32 LE   │ zero-padded   │         zero-padded          │
//! └──────────┴───────────────┴──────────────────────────────┘
//! 0          4               36                           292
//! ```
//!
//! Widths come from the table's `Config`; the values above are the defaults.

mod codec;
mod layout;

pub use codec::RowCodec;
pub use layout::{RowLayout, ID_SIZE};

use std::borrow::Cow;
use std::fmt;

/// One record: id, username, email
///
/// Text fields are raw bytes. A row produced by [`RowCodec::decode`] carries
/// the full column width, trailing zero padding included; the accessors strip
/// it for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: Vec<u8>,
    email: Vec<u8>,
}

impl Row {
    pub fn new(id: u32, username: impl Into<Vec<u8>>, email: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Username bytes as stored, padding included
    pub fn username_bytes(&self) -> &[u8] {
        &self.username
    }

    /// Email bytes as stored, padding included
    pub fn email_bytes(&self) -> &[u8] {
        &self.email
    }

    /// Username text without trailing zero padding
    pub fn username(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(trim_padding(&self.username))
    }

    /// Email text without trailing zero padding
    pub fn email(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(trim_padding(&self.email))
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username(), self.email())
    }
}

/// Strip trailing zero bytes left by fixed-width encoding
pub fn trim_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
    &bytes[..end]
}
