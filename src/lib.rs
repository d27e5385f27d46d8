//! # PageDB
//!
//! A minimal persistent row store with:
//! - Fixed-width row records packed into fixed-size pages
//! - Lazy page loading from a single backing file
//! - Write-back durability on flush/close
//! - A line-oriented command shell (`insert` / `select`)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Shell Session                          │
//! │             (prompt loop, meta-commands)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Statement
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Engine                                │
//! │                 (insert / select)                           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  RowCodec   │          │    Table    │
//!   │ (encode/    │          │ (row → page │
//!   │  decode)    │          │   offset)   │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  PageStore  │
//!                           │   (file)    │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod row;
pub mod storage;
pub mod statement;
pub mod shell;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PageDbError, Result};
pub use config::Config;
pub use engine::{Engine, ExecuteOutcome};
pub use row::Row;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of PageDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
