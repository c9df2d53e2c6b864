//! # sharpfix-base
//!
//! Core library for normalizing the using directives of C# source buffers:
//! redundant imports are removed, the rest sorted, and missing imports added
//! where exactly one namespace binds an unresolved name.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → Import fixer, code actions, AnalysisHost
//!   ↓
//! hir     → Symbol tables, name resolution, import usage
//!   ↓
//! syntax  → Lexer + lossless parser (logos, rowan)
//!   ↓
//! base    → Primitives (FileId, SourceBuffer, LineIndex)
//! ```

/// Foundation types: FileId, SourceBuffer, line/column conversion
pub mod base;

/// Semantic layer: symbols, resolution, import usage
pub mod hir;

/// IDE features: fix imports and the C# collaborators
pub mod ide;

/// Syntax: tokens and rowan trees for the C# subset
pub mod syntax;

pub use base::{FileId, LineCol, LineIndex, SourceBuffer, TextRange, TextSize};
pub use ide::{AnalysisHost, FixError, FixImportsConfig, FixImportsRequest, FixImportsResponse, FixResult, ImportFixer};
