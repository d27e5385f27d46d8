//! Row layout
//!
//! Field widths and offsets of the fixed-width row record.

/// Byte width of the id column
pub const ID_SIZE: usize = std::mem::size_of::<u32>();

/// Byte widths and offsets of one row record
///
/// ```text
/// ┌──────────┬─────────────────────┬──────────────────────────┐
/// │  id (4)  │ username (u bytes)  │    email (e bytes)       │
/// └──────────┴─────────────────────┴──────────────────────────┘
/// 0          4                     4+u                   4+u+e
/// ```
///
/// Computed once from the column widths and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    username_size: usize,
    email_size: usize,
    username_offset: usize,
    email_offset: usize,
    row_size: usize,
}

impl RowLayout {
    pub fn new(username_size: usize, email_size: usize) -> Self {
        let username_offset = ID_SIZE;
        let email_offset = username_offset + username_size;
        Self {
            username_size,
            email_size,
            username_offset,
            email_offset,
            row_size: email_offset + email_size,
        }
    }

    pub fn id_offset(&self) -> usize {
        0
    }

    pub fn username_offset(&self) -> usize {
        self.username_offset
    }

    pub fn email_offset(&self) -> usize {
        self.email_offset
    }

    pub fn username_size(&self) -> usize {
        self.username_size
    }

    pub fn email_size(&self) -> usize {
        self.email_size
    }

    /// Total bytes of one encoded row
    pub fn row_size(&self) -> usize {
        self.row_size
    }
}
