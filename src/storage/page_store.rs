//! Page Store
//!
//! Owns the backing file and the resident page cache.
//!
//! ## Responsibilities
//! - Record the durable length of the file at open
//! - Materialize pages lazily, hydrating from disk when they hold durable bytes
//! - Write resident pages back on flush, truncated to the last row

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{PageDbError, Result};

use super::table::durable_len_for;

/// One page slot: absent until first touched, then resident until close
type PageSlot = Option<Box<[u8]>>;

/// Fixed-capacity cache of pages over a single file
///
/// ## Residency:
/// - `pages` has exactly `max_pages` slots indexed by page number
/// - A slot is filled on first `get_page` and never evicted
/// - Occupancy is bounded by `max_pages × page_size`
pub struct PageStore {
    /// Path of the backing file (for logging)
    path: PathBuf,

    /// Backing file, opened read-write
    file: File,

    /// Bytes that are durable on disk: length at open (before extension), then as of the last flush
    durable_len: u64,

    /// Size of one page in bytes
    page_size: usize,

    /// Page arena, one slot per page number
    pages: Vec<PageSlot>,
}

impl PageStore {
    /// Open or create the backing file
    ///
    /// On open:
    /// 1. Open read-write without truncating
    /// 2. Record the current length as the durable byte count
    /// 3. Extend the file to `max_pages × page_size` so page writes never land past EOF
    pub fn open(path: &Path, page_size: usize, max_pages: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let durable_len = file.metadata()?.len();

        let logical_len = (page_size * max_pages) as u64;
        if durable_len < logical_len {
            file.set_len(logical_len)?;
        }

        tracing::debug!(
            path = %path.display(),
            durable_len,
            logical_len,
            "Opened page store"
        );

        Ok(Self {
            path: path.to_path_buf(),
            file,
            durable_len,
            page_size,
            pages: vec![None; max_pages],
        })
    }

    /// Get a mutable view of page `page_num`, loading it on first access
    ///
    /// Bytes of the page past the durable length read as zero.
    pub fn get_page(&mut self, page_num: usize) -> Result<&mut [u8]> {
        let max_pages = self.pages.len();
        if page_num >= max_pages {
            return Err(PageDbError::CapacityExceeded {
                page: page_num,
                max_pages,
            });
        }

        let slot = &mut self.pages[page_num];
        let page = match slot.take() {
            Some(page) => page,
            None => load_page(&mut self.file, self.durable_len, self.page_size, page_num)?,
        };

        Ok(&mut slot.insert(page)[..])
    }

    /// Write resident pages back to disk
    ///
    /// `row_count` rows of `row_size` bytes are laid out `rows_per_page` to a
    /// page. Full pages are written whole, the final partial page only up to
    /// its last row. Pages that were never materialized already hold their
    /// durable bytes on disk and are skipped. Afterwards the file is cut to the
    /// durable length and synced.
    pub fn flush(&mut self, row_count: usize, rows_per_page: usize, row_size: usize) -> Result<()> {
        let full_pages = row_count / rows_per_page;
        let remaining_rows = row_count % rows_per_page;

        let mut written = 0usize;
        for page_num in 0..full_pages {
            if self.write_page(page_num, self.page_size)? {
                written += 1;
            }
        }

        if remaining_rows > 0 && self.write_page(full_pages, remaining_rows * row_size)? {
            written += 1;
        }

        let durable_len = durable_len_for(row_count, self.page_size, rows_per_page, row_size);
        self.file.set_len(durable_len)?;
        self.file.sync_all()?;
        self.durable_len = durable_len;

        tracing::debug!(
            path = %self.path.display(),
            row_count,
            pages_written = written,
            durable_len,
            "Flushed page store"
        );

        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Bytes known to be on disk: the open-time length, or the length set by the last flush
    pub fn durable_len(&self) -> u64 {
        self.durable_len
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn max_pages(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages currently held in memory
    pub fn resident_pages(&self) -> usize {
        self.pages.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_resident(&self, page_num: usize) -> bool {
        matches!(self.pages.get(page_num), Some(Some(_)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Write the first `len` bytes of a resident page; returns false if the page is absent
    fn write_page(&mut self, page_num: usize, len: usize) -> Result<bool> {
        let offset = self.page_offset(page_num);
        let Some(page) = self.pages.get(page_num).and_then(|slot| slot.as_deref()) else {
            tracing::trace!(page_num, "Skipping page that was never loaded");
            return Ok(false);
        };

        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&page[..len])?;
        Ok(true)
    }

    fn page_offset(&self, page_num: usize) -> u64 {
        (page_num * self.page_size) as u64
    }
}

impl Drop for PageStore {
    /// Undo the open-time extension so unflushed pages never read back as rows
    fn drop(&mut self) {
        if let Err(e) = self.file.set_len(self.durable_len) {
            tracing::warn!(
                path = %self.path.display(),
                durable_len = self.durable_len,
                "Failed to restore durable length: {}",
                e
            );
        }
    }
}

/// Allocate a zeroed page and fill the prefix that lies below the durable length
fn load_page(file: &mut File, durable_len: u64, page_size: usize, page_num: usize) -> Result<Box<[u8]>> {
    let mut page = vec![0u8; page_size].into_boxed_slice();

    let offset = (page_num * page_size) as u64;
    let valid = durable_len.saturating_sub(offset).min(page_size as u64) as usize;

    if valid > 0 {
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut page[..valid])?;
        tracing::debug!(page_num, bytes = valid, "Hydrated page from disk");
    } else {
        tracing::debug!(page_num, "Allocated fresh page");
    }

    Ok(page)
}
