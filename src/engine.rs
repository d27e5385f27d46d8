//! Engine Module
//!
//! The execution engine that runs statements against a table.
//!
//! ## Responsibilities
//! - Append rows through the table's slot addressing and the row codec
//! - Stream rows back in insertion order
//! - Enforce the table's capacity ceiling
//! - Flush on request and on close

use std::path::Path;

use crate::config::Config;
use crate::error::{PageDbError, Result};
use crate::row::{Row, RowCodec};
use crate::statement::Statement;
use crate::storage::Table;

/// The main execution engine
///
/// ## Concurrency Model: single owner
///
/// Every operation takes `&mut self` (or `self` for close). The resident page
/// cache and row count have no internal locking; sharing an engine across
/// threads is up to the caller.
///
/// ## Durability
///
/// Inserts only touch resident pages. Rows reach disk on `flush()` or
/// `close()`; dropping an engine without closing it loses them.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Row storage
    table: Table,

    /// Codec for the table's row layout
    codec: RowCodec,
}

/// Result of a successfully executed statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// One row was appended
    Inserted,

    /// All rows, in insertion order
    Selected(Vec<Row>),
}

impl Engine {
    /// Open or create the table described by `config`
    pub fn open(config: Config) -> Result<Self> {
        let table = Table::open(&config)?;
        let codec = RowCodec::new(*table.layout());

        Ok(Self {
            config,
            table,
            codec,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified database file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().db_path(path).build();
        Self::open(config)
    }

    /// Execute a prepared statement
    ///
    /// Routes statements to appropriate handlers
    pub fn execute(&mut self, statement: Statement) -> Result<ExecuteOutcome> {
        match statement {
            Statement::Insert(row) => {
                self.insert(&row)?;
                Ok(ExecuteOutcome::Inserted)
            }
            Statement::Select => {
                let rows = self.select().collect::<Result<Vec<_>>>()?;
                Ok(ExecuteOutcome::Selected(rows))
            }
        }
    }

    /// Append a row
    ///
    /// Fails with `TableFull` once `max_rows` rows exist; the row count is
    /// left unchanged in that case.
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        let row_num = self.table.row_count();
        if row_num >= self.table.max_rows() {
            tracing::debug!(row_count = row_num, "Rejecting insert: table full");
            return Err(PageDbError::TableFull);
        }

        let slot = self.table.slot(row_num)?;
        self.codec.encode(row, slot);
        self.table.increment_row_count();

        tracing::trace!(row_num, id = row.id(), "Inserted row");
        Ok(())
    }

    /// Iterate over all rows in insertion order
    ///
    /// Each call starts again from the first row.
    pub fn select(&mut self) -> Rows<'_> {
        let end = self.table.row_count();
        Rows {
            table: &mut self.table,
            codec: self.codec,
            next: 0,
            end,
        }
    }

    /// Write resident pages to disk without closing
    pub fn flush(&mut self) -> Result<()> {
        self.table.flush()
    }

    /// Close the engine gracefully
    ///
    /// Flushes all rows and syncs the file
    pub fn close(self) -> Result<()> {
        self.table.close()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of rows in the table
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Capacity ceiling of the table
    pub fn max_rows(&self) -> usize {
        self.table.max_rows()
    }

    /// Get the underlying table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Get the row codec
    pub fn codec(&self) -> &RowCodec {
        &self.codec
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Lazy iterator over a table's rows, lowest index first
pub struct Rows<'a> {
    table: &'a mut Table,
    codec: RowCodec,
    next: usize,
    end: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }

        let row_num = self.next;
        self.next += 1;

        match self.table.slot(row_num) {
            Ok(slot) => Some(Ok(self.codec.decode(slot))),
            Err(e) => {
                // Stop after the first failure
                self.next = self.end;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Rows<'a> {}
