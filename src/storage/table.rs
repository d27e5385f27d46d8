//! Table
//!
//! Logical row sequence over a page store.

use std::path::Path;

use crate::config::Config;
use crate::error::{PageDbError, Result};
use crate::row::RowLayout;

use super::PageStore;

/// Maps logical row indices onto page bytes and tracks how many rows exist
///
/// Row `i` lives on page `i / rows_per_page` at byte offset
/// `(i % rows_per_page) * row_size`.
pub struct Table {
    /// Page cache over the backing file
    pager: PageStore,

    /// Row schema widths and offsets
    layout: RowLayout,

    /// Whole rows that fit in one page
    rows_per_page: usize,

    /// Number of rows in the table; only grows while open
    row_count: usize,
}

impl Table {
    /// Open the table described by `config`
    ///
    /// The row count is recovered from the durable file length. A trailing
    /// fragment shorter than one row is a torn write and is dropped. A file
    /// longer than `max_pages × page_size` is rejected rather than cut down.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let layout = config.layout();
        let rows_per_page = config.rows_per_page();
        let pager = PageStore::open(&config.db_path, config.page_size, config.max_pages)?;

        let durable_len = pager.durable_len();
        let logical_len = (config.page_size * config.max_pages) as u64;
        if durable_len > logical_len {
            return Err(PageDbError::Config(format!(
                "{} holds {} bytes, more than {} pages of {} bytes",
                config.db_path.display(),
                durable_len,
                config.max_pages,
                config.page_size
            )));
        }

        let row_count = rows_in_length(durable_len, config.page_size, rows_per_page, layout.row_size());

        let expected_len = durable_len_for(row_count, config.page_size, rows_per_page, layout.row_size());
        if durable_len != expected_len {
            tracing::warn!(
                path = %config.db_path.display(),
                durable_len,
                row_count,
                "Discarding bytes past the last whole row"
            );
        }

        tracing::info!(
            path = %config.db_path.display(),
            row_count,
            rows_per_page,
            row_size = layout.row_size(),
            "Opened table"
        );

        Ok(Self {
            pager,
            layout,
            rows_per_page,
            row_count,
        })
    }

    /// Open a table at `path` with the default geometry
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().db_path(path).build();
        Self::open(&config)
    }

    /// Byte window of row `row_num`
    ///
    /// Addressing only: the page is loaded if needed, row bytes are not touched.
    pub fn slot(&mut self, row_num: usize) -> Result<&mut [u8]> {
        let page_num = row_num / self.rows_per_page;
        let byte_offset = (row_num % self.rows_per_page) * self.layout.row_size();
        let row_size = self.layout.row_size();

        let page = self.pager.get_page(page_num)?;
        Ok(&mut page[byte_offset..byte_offset + row_size])
    }

    /// Append bookkeeping after a row has been written to `slot(row_count)`
    pub(crate) fn increment_row_count(&mut self) {
        self.row_count += 1;
    }

    /// Write every resident row back to disk without closing
    pub fn flush(&mut self) -> Result<()> {
        self.pager
            .flush(self.row_count, self.rows_per_page, self.layout.row_size())
    }

    /// Flush and release the file handle
    pub fn close(mut self) -> Result<()> {
        self.flush()?;
        tracing::info!(
            path = %self.pager.path().display(),
            row_count = self.row_count,
            "Closed table"
        );
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Hard capacity ceiling: `max_pages × rows_per_page`
    pub fn max_rows(&self) -> usize {
        self.pager.max_pages() * self.rows_per_page
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn pager(&self) -> &PageStore {
        &self.pager
    }
}

/// Whole rows held by a file of `len` bytes
///
/// Full pages contribute `rows_per_page` rows each, ignoring their unused
/// tail; the last partial page contributes its whole rows.
pub(crate) fn rows_in_length(len: u64, page_size: usize, rows_per_page: usize, row_size: usize) -> usize {
    let full_pages = (len / page_size as u64) as usize;
    let tail = (len % page_size as u64) as usize;
    full_pages * rows_per_page + (tail / row_size).min(rows_per_page)
}

/// File length that holds exactly `row_count` rows
pub(crate) fn durable_len_for(row_count: usize, page_size: usize, rows_per_page: usize, row_size: usize) -> u64 {
    ((row_count / rows_per_page) * page_size + (row_count % rows_per_page) * row_size) as u64
}
