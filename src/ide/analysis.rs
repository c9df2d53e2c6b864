//! The analysis host: owns open buffers and runs fixes over them.
//!
//! The host is the entry point editors talk to. It keeps the last fixed
//! contents of every file it has seen, the library symbol table shared by all
//! snapshots and the fix configuration.

use std::sync::Arc;

use super::code_actions::CSharpCodeActions;
use super::fix_imports::{FixError, FixImportsConfig, FixImportsRequest, FixImportsResponse, FixResult, ImportFixer};
use super::snapshot::CSharpSnapshotProvider;
use crate::base::SourceBuffer;
use crate::hir::{FileSet, SymbolTable};

/// Owns the file set and fix configuration.
///
/// ```
/// use sharpfix::ide::{AnalysisHost, FixImportsRequest};
///
/// let host = AnalysisHost::new();
/// let request = FixImportsRequest::new("a.cs", "class A { Console c; }");
/// let response = host.fix_imports(&request).unwrap();
/// assert_eq!(response.buffer, "using System;\nclass A { Console c; }");
/// ```
#[derive(Debug)]
pub struct AnalysisHost {
    files: FileSet,
    library: Arc<SymbolTable>,
    config: FixImportsConfig,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a host over the standard library table.
    pub fn new() -> Self {
        Self::with_library(SymbolTable::standard())
    }

    /// Create a host over a custom library table.
    pub fn with_library(library: SymbolTable) -> Self {
        Self {
            files: FileSet::new(),
            library: Arc::new(library),
            config: FixImportsConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FixImportsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FixImportsConfig {
        &self.config
    }

    pub fn library(&self) -> &Arc<SymbolTable> {
        &self.library
    }

    /// Files seen so far, with their last fixed contents.
    pub fn files(&self) -> &FileSet {
        &self.files
    }

    fn fixer(&self) -> ImportFixer<CSharpSnapshotProvider, CSharpCodeActions> {
        ImportFixer::new(
            CSharpSnapshotProvider::new(self.library.clone()),
            CSharpCodeActions::new(),
        )
        .with_config(self.config.clone())
    }

    /// Fix one buffer and remember the result.
    pub fn fix_buffer(&self, buffer: SourceBuffer) -> Result<FixResult, FixError> {
        let result = self.fixer().run(buffer)?;
        self.files.store(result.buffer.clone());
        Ok(result)
    }

    /// Handle an editor request.
    ///
    /// The request position is ignored; the whole buffer is fixed.
    pub fn fix_imports(&self, request: &FixImportsRequest) -> Result<FixImportsResponse, FixError> {
        tracing::debug!(file = %request.file_name, line = request.line, column = request.column, "fix imports request");
        let buffer = self.files.open(&request.file_name, &request.buffer);
        self.fix_buffer(buffer).map(FixImportsResponse::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_imports_stores_result() {
        let host = AnalysisHost::new();
        let request = FixImportsRequest::new("a.cs", "using System.IO;\nclass A { Console c; }")
            .with_position(i32::MAX as u32, 0);
        let response = host.fix_imports(&request).unwrap();
        assert_eq!(response.buffer, "using System;\nclass A { Console c; }");
        assert!(response.ambiguities.is_empty());

        let file = host.files().file_id("a.cs");
        assert_eq!(host.files().len(), 1);
        assert_eq!(host.files().buffer(file).unwrap().text(), response.buffer);
    }

    #[test]
    fn test_parse_failure_keeps_previous_contents() {
        let host = AnalysisHost::new();
        host.fix_imports(&FixImportsRequest::new("a.cs", "class A {}")).unwrap();
        let err = host
            .fix_imports(&FixImportsRequest::new("a.cs", "class A { $ }"))
            .unwrap_err();
        assert!(matches!(err, FixError::Parse { .. }));

        let file = host.files().file_id("a.cs");
        assert_eq!(host.files().buffer(file).unwrap().text(), "class A {}");
    }

    #[test]
    fn test_custom_library() {
        let mut library = SymbolTable::new();
        library.add_type(crate::hir::TypeInfo::new("Acme.Ui", "Widget"));
        let host = AnalysisHost::with_library(library);
        let response = host
            .fix_imports(&FixImportsRequest::new("a.cs", "class A { Widget w; Console c; }"))
            .unwrap();
        assert_eq!(response.buffer, "using Acme.Ui;\nclass A { Widget w; Console c; }");
    }
}
