//! Configuration for PageDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{PageDbError, Result};
use crate::row::RowLayout;

/// Default page size in bytes
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// Default number of page slots in a table
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Default username column width in bytes
pub const DEFAULT_USERNAME_SIZE: usize = 32;

/// Default email column width in bytes
pub const DEFAULT_EMAIL_SIZE: usize = 256;

/// Main configuration for a PageDB table
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // File Configuration
    // -------------------------------------------------------------------------
    /// Path of the single backing file
    pub db_path: PathBuf,

    // -------------------------------------------------------------------------
    // Page Geometry
    // -------------------------------------------------------------------------
    /// Size of one page in bytes (unit of I/O)
    pub page_size: usize,

    /// Number of page slots; together with rows per page this caps the table
    pub max_pages: usize,

    // -------------------------------------------------------------------------
    // Row Schema
    // -------------------------------------------------------------------------
    /// Width of the username column in bytes
    pub username_size: usize,

    /// Width of the email column in bytes
    pub email_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("pagedb.db"),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            username_size: DEFAULT_USERNAME_SIZE,
            email_size: DEFAULT_EMAIL_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Row layout derived from the configured column widths
    pub fn layout(&self) -> RowLayout {
        RowLayout::new(self.username_size, self.email_size)
    }

    /// Number of whole rows that fit in one page
    pub fn rows_per_page(&self) -> usize {
        self.page_size / self.layout().row_size()
    }

    /// Hard capacity ceiling of the table
    pub fn max_rows(&self) -> usize {
        self.rows_per_page() * self.max_pages
    }

    /// Reject geometries the pager cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(PageDbError::Config("max_pages must be at least 1".to_string()));
        }

        let row_size = self.layout().row_size();
        if self.page_size < row_size {
            return Err(PageDbError::Config(format!(
                "page_size {} cannot hold a single row of {} bytes",
                self.page_size, row_size
            )));
        }

        if self.page_size.checked_mul(self.max_pages).is_none() {
            return Err(PageDbError::Config(format!(
                "page_size {} x max_pages {} overflows",
                self.page_size, self.max_pages
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the page size (in bytes)
    pub fn page_size(mut self, size: usize) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the number of page slots
    pub fn max_pages(mut self, count: usize) -> Self {
        self.config.max_pages = count;
        self
    }

    /// Set the username column width (in bytes)
    pub fn username_size(mut self, size: usize) -> Self {
        self.config.username_size = size;
        self
    }

    /// Set the email column width (in bytes)
    pub fn email_size(mut self, size: usize) -> Self {
        self.config.email_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
