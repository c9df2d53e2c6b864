//! File set: stable ids for file names and the last buffer fixed for each.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::base::{FileId, SourceBuffer};

/// Maps file names to [`FileId`]s and remembers the latest buffer per file.
///
/// Shared by reference; all methods take `&self`.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    name_to_id: IndexMap<Arc<str>, FileId>,
    buffers: IndexMap<FileId, SourceBuffer>,
    next_id: u32,
}

impl FileSet {
    /// Create an empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or assign the id for `name`.
    pub fn file_id(&self, name: &str) -> FileId {
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.name_to_id.get(name) {
                return id;
            }
        }

        let mut inner = self.inner.write();
        // Another writer may have won the race.
        if let Some(&id) = inner.name_to_id.get(name) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        inner.name_to_id.insert(Arc::from(name), id);
        id
    }

    /// The name registered for `file`.
    pub fn name(&self, file: FileId) -> Option<Arc<str>> {
        self.inner
            .read()
            .name_to_id
            .iter()
            .find_map(|(name, &id)| (id == file).then(|| name.clone()))
    }

    /// A fresh buffer for `name` holding `text`.
    pub fn open(&self, name: &str, text: &str) -> SourceBuffer {
        let file = self.file_id(name);
        SourceBuffer::new(file, name, text)
    }

    /// Remember `buffer` as the latest contents of its file.
    pub fn store(&self, buffer: SourceBuffer) {
        self.inner.write().buffers.insert(buffer.file(), buffer);
    }

    /// The latest stored buffer of `file`.
    pub fn buffer(&self, file: FileId) -> Option<SourceBuffer> {
        self.inner.read().buffers.get(&file).cloned()
    }

    /// Forget a file's stored buffer. Its id stays reserved.
    pub fn evict(&self, file: FileId) -> Option<SourceBuffer> {
        self.inner.write().buffers.swap_remove(&file)
    }

    /// Number of known file names.
    pub fn len(&self) -> usize {
        self.inner.read().name_to_id.len()
    }

    /// Whether no file name is known.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
