//! Results of a fix run and the request/response boundary types.

use smol_str::SmolStr;

use crate::base::{LineCol, SourceBuffer};

/// Why a notice was raised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoticeKind {
    /// Several namespaces bind the name.
    #[default]
    Ambiguous,
    /// No namespace binds the name.
    Unresolved,
}

/// A reference the run left alone, reported to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct AmbiguityNotice {
    pub file_name: String,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
    #[cfg_attr(feature = "serde", serde(rename = "Text"))]
    pub message: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub kind: NoticeKind,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub candidates: Vec<SmolStr>,
}

impl AmbiguityNotice {
    /// `name` at `position` is bound by every namespace in `candidates`.
    pub fn ambiguous(file_name: impl Into<String>, position: LineCol, name: &str, candidates: Vec<SmolStr>) -> Self {
        Self {
            file_name: file_name.into(),
            line: position.line_one_indexed(),
            column: position.col_one_indexed(),
            message: format!("`{name}` is ambiguous"),
            kind: NoticeKind::Ambiguous,
            candidates,
        }
    }

    /// `name` at `position` is bound by no namespace.
    pub fn unresolved(file_name: impl Into<String>, position: LineCol, name: &str) -> Self {
        Self {
            file_name: file_name.into(),
            line: position.line_one_indexed(),
            column: position.col_one_indexed(),
            message: format!("`{name}` could not be resolved"),
            kind: NoticeKind::Unresolved,
            candidates: Vec::new(),
        }
    }
}

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixStats {
    /// References taken from the scanner.
    pub iterations: usize,
    /// Imports added by the loop.
    pub applied: usize,
    /// References left ambiguous.
    pub ambiguous: usize,
    /// References with no candidate, or whose edit made no progress.
    pub stalled: usize,
}

/// Outcome of a run: the final buffer and everything left for the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixResult {
    pub buffer: SourceBuffer,
    /// In the order references were encountered.
    pub notices: Vec<AmbiguityNotice>,
    pub stats: FixStats,
}

impl FixResult {
    pub(crate) fn assemble(buffer: SourceBuffer, notices: Vec<AmbiguityNotice>, stats: FixStats) -> Self {
        Self {
            buffer,
            notices,
            stats,
        }
    }

    /// Notices of one kind.
    pub fn notices_of(&self, kind: NoticeKind) -> impl Iterator<Item = &AmbiguityNotice> {
        self.notices.iter().filter(move |notice| notice.kind == kind)
    }
}

// ============================================================================
// BOUNDARY
// ============================================================================

/// A fix request as sent by an editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct FixImportsRequest {
    pub buffer: String,
    pub file_name: String,
    /// Passed through; the fix ignores the cursor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub line: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub column: u32,
}

impl FixImportsRequest {
    pub fn new(file_name: impl Into<String>, buffer: impl Into<String>) -> Self {
        Self {
            buffer: buffer.into(),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

/// The reply to a [`FixImportsRequest`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct FixImportsResponse {
    pub buffer: String,
    pub ambiguities: Vec<AmbiguityNotice>,
}

impl From<FixResult> for FixImportsResponse {
    fn from(result: FixResult) -> Self {
        Self {
            buffer: result.buffer.text().to_owned(),
            ambiguities: result.notices,
        }
    }
}
