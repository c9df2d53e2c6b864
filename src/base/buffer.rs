//! Immutable source buffers.

use std::fmt;
use std::sync::Arc;

use super::{FileId, LineIndex};

/// An immutable snapshot of one file's text.
///
/// Every pass of a fix operation consumes a buffer and produces a new one;
/// text is never edited in place. Cloning is cheap (shared `Arc`s).
#[derive(Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    file: FileId,
    name: Arc<str>,
    text: Arc<str>,
}

impl SourceBuffer {
    /// Create a buffer for `file` with display name `name`.
    pub fn new(file: FileId, name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self {
            file,
            name: name.into(),
            text: text.into(),
        }
    }

    /// The file this buffer belongs to.
    #[inline]
    pub fn file(&self) -> FileId {
        self.file
    }

    /// The file name used in notices.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared file name.
    pub fn name_arc(&self) -> Arc<str> {
        self.name.clone()
    }

    /// The buffer text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Derive a buffer for the same file holding `text`.
    pub fn with_text(&self, text: impl Into<Arc<str>>) -> Self {
        Self {
            file: self.file,
            name: self.name.clone(),
            text: text.into(),
        }
    }

    /// Build a line index over the current text.
    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text)
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Debug for SourceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceBuffer")
            .field("file", &self.file)
            .field("name", &self.name)
            .field("len", &self.text.len())
            .finish()
    }
}
