//! Foundation types for the sharpfix toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`SourceBuffer`] - Immutable text snapshot of one file
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//!
//! This module has NO dependencies on other sharpfix modules.

mod buffer;
mod file_id;
mod span;

pub use buffer::SourceBuffer;
pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
