//! Storage Module
//!
//! Paged persistence for fixed-width rows.
//!
//! ## Responsibilities
//! - Own the single backing file
//! - Load pages lazily and keep them resident until close
//! - Address row `i` as a byte window inside its page
//! - Write resident pages back on flush/close
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Page 0 (page_size bytes)               │
//! │ ┌────────┬────────┬─────┬────────────┐ │
//! │ │ Row 0  │ Row 1  │ ... │ unused     │ │
//! │ └────────┴────────┴─────┴────────────┘ │
//! ├────────────────────────────────────────┤
//! │ Page 1                                 │
//! │ ... (up to max_pages pages)            │
//! ├────────────────────────────────────────┤
//! │ Last page: only whole rows, no padding │
//! └────────────────────────────────────────┘
//! ```
//!
//! There is no header; the file length alone says how many rows are durable.

mod page_store;
mod table;

pub use page_store::PageStore;
pub use table::Table;
