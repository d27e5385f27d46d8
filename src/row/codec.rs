//! Row codec
//!
//! Fixed-width binary encoding of a single row into a page buffer.

use bytes::{Buf, BufMut};

use super::{Row, RowLayout};

/// Encodes and decodes rows for one layout
///
/// Buffers shorter than `row_size` are a programming error and panic on the
/// slice bounds check.
#[derive(Debug, Clone, Copy)]
pub struct RowCodec {
    layout: RowLayout,
}

impl RowCodec {
    pub fn new(layout: RowLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Write `row` into the first `row_size` bytes of `buffer`
    ///
    /// id is little-endian; text fields are truncated to their column width
    /// and zero-padded.
    pub fn encode(&self, row: &Row, buffer: &mut [u8]) {
        let mut dst = &mut buffer[..self.layout.row_size()];

        dst.put_u32_le(row.id());
        put_padded(&mut dst, row.username_bytes(), self.layout.username_size());
        put_padded(&mut dst, row.email_bytes(), self.layout.email_size());
    }

    /// Read a row from the first `row_size` bytes of `buffer`
    ///
    /// Text fields come back at full column width; see [`Row::username`].
    pub fn decode(&self, buffer: &[u8]) -> Row {
        let mut src = &buffer[..self.layout.row_size()];

        let id = src.get_u32_le();
        let username = src[..self.layout.username_size()].to_vec();
        src.advance(self.layout.username_size());
        let email = src[..self.layout.email_size()].to_vec();

        Row::new(id, username, email)
    }
}

fn put_padded(dst: &mut &mut [u8], value: &[u8], width: usize) {
    let len = value.len().min(width);
    dst.put_slice(&value[..len]);
    dst.put_bytes(0, width - len);
}
