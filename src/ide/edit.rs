//! Text edits and the scoped edit script that applies them.

use crate::base::{SourceBuffer, TextRange, TextSize};

/// Replace `range` with `insert`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextEdit {
    pub range: TextRange,
    pub insert: String,
}

impl TextEdit {
    /// Insert `text` at `offset`.
    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self {
            range: TextRange::empty(offset),
            insert: text.into(),
        }
    }

    /// Delete `range`.
    pub fn delete(range: TextRange) -> Self {
        Self {
            range,
            insert: String::new(),
        }
    }

    /// Replace `range` with `text`.
    pub fn replace(range: TextRange, text: impl Into<String>) -> Self {
        Self {
            range,
            insert: text.into(),
        }
    }

    /// Whether applying this edit changes nothing.
    pub fn is_noop(&self) -> bool {
        self.range.is_empty() && self.insert.is_empty()
    }
}

/// Failure to apply a set of edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("edit range {range:?} exceeds text length {len}")]
    OutOfBounds { range: TextRange, len: usize },
    #[error("edit ranges {first:?} and {second:?} overlap")]
    Overlapping { first: TextRange, second: TextRange },
    #[error("edit offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

/// Apply `edits` to `text`.
///
/// Edits are expressed against the original text. Inserts at the same
/// offset keep their given order.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| (edit.range.start(), edit.range.end()));

    for edit in &sorted {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        if end > text.len() {
            return Err(EditError::OutOfBounds {
                range: edit.range,
                len: text.len(),
            });
        }
        for offset in [start, end] {
            if !text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
    }
    for pair in sorted.windows(2) {
        let (first, second) = (pair[0].range, pair[1].range);
        if first.end() > second.start() {
            return Err(EditError::Overlapping { first, second });
        }
    }

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in sorted {
        let start = usize::from(edit.range.start());
        result.push_str(&text[cursor..start]);
        result.push_str(&edit.insert);
        cursor = usize::from(edit.range.end());
    }
    result.push_str(&text[cursor..]);
    Ok(result)
}

// ============================================================================
// EDIT SCRIPT
// ============================================================================

/// A scoped batch of edits against one buffer.
///
/// Edits accumulate until [`EditScript::commit`] produces the new buffer.
/// A script dropped without committing discards its edits, whichever way the
/// scope is left.
#[derive(Debug)]
pub struct EditScript<'a> {
    base: &'a SourceBuffer,
    edits: Vec<TextEdit>,
    committed: bool,
}

impl<'a> EditScript<'a> {
    /// Open a script over `base`.
    pub fn begin(base: &'a SourceBuffer) -> Self {
        tracing::trace!(file = %base.file(), "edit script opened");
        Self {
            base,
            edits: Vec::new(),
            committed: false,
        }
    }

    /// Queue edits.
    pub fn apply(&mut self, edits: impl IntoIterator<Item = TextEdit>) {
        self.edits
            .extend(edits.into_iter().filter(|edit| !edit.is_noop()));
    }

    /// Number of queued edits.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply the queued edits, yielding the next buffer.
    pub fn commit(mut self) -> Result<SourceBuffer, EditError> {
        self.committed = true;
        if self.edits.is_empty() {
            return Ok(self.base.clone());
        }
        let text = apply_edits(self.base.text(), &self.edits)?;
        tracing::trace!(file = %self.base.file(), edits = self.edits.len(), "edit script committed");
        Ok(self.base.with_text(text))
    }
}

impl Drop for EditScript<'_> {
    fn drop(&mut self) {
        if !self.committed && !self.edits.is_empty() {
            tracing::debug!(
                file = %self.base.file(),
                edits = self.edits.len(),
                "edit script released without commit"
            );
        }
    }
}
