//! Snapshots of C# buffers: tree, line index, symbols and imports.

use std::sync::Arc;

use crate::base::{LineCol, LineIndex, SourceBuffer, TextRange};
use crate::hir::{ImportScope, ResolutionOutcome, Resolver, SymbolTable, Symbols};
use crate::ide::fix_imports::{FixError, ImportSite, Snapshot, SnapshotProvider};
use crate::syntax::{SyntaxKind, SyntaxNode, ast, parse};

/// One parsed, resolvable state of a C# buffer.
#[derive(Clone, Debug)]
pub struct CSharpSnapshot {
    root: SyntaxNode,
    line_index: LineIndex,
    library: Arc<SymbolTable>,
    local: SymbolTable,
    imports: ImportScope,
}

impl CSharpSnapshot {
    /// Parse `buffer` and index its declarations and imports.
    pub fn new(buffer: &SourceBuffer, library: Arc<SymbolTable>) -> Result<Self, FixError> {
        let parse = parse(buffer.text()).map_err(|source| FixError::Parse {
            file: buffer.name_arc(),
            source,
        })?;
        let root = parse.syntax();

        Ok(Self {
            line_index: buffer.line_index(),
            local: SymbolTable::collect(&root),
            imports: ImportScope::collect(&root),
            library,
            root,
        })
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn import_scope(&self) -> &ImportScope {
        &self.imports
    }

    /// Library and buffer symbols combined.
    pub fn symbols(&self) -> Symbols<'_> {
        Symbols::new(&self.library, &self.local)
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.symbols(), &self.imports)
    }

    /// Using directives, in document order.
    pub fn using_directives(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.root
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::USING_DIRECTIVE)
    }
}

impl Snapshot for CSharpSnapshot {
    type Node = SyntaxNode;

    fn preorder(&self) -> Vec<SyntaxNode> {
        self.root.descendants().collect()
    }

    fn descendants(&self, node: &SyntaxNode) -> Vec<SyntaxNode> {
        node.descendants().collect()
    }

    fn text(&self, node: &SyntaxNode) -> String {
        node.text().to_string()
    }

    fn range(&self, node: &SyntaxNode) -> TextRange {
        node.text_range()
    }

    fn start(&self, node: &SyntaxNode) -> LineCol {
        self.line_index.line_col(node.text_range().start())
    }

    fn resolve(&self, node: &SyntaxNode) -> Result<ResolutionOutcome, FixError> {
        Ok(self.resolver().resolve(node))
    }

    fn imports(&self) -> Vec<ImportSite<SyntaxNode>> {
        self.using_directives()
            .filter_map(|node| {
                let namespace = ast::namespace_name(&node)?;
                let alias = if ast::is_alias_using(&node) {
                    ast::name_text(&node)
                } else {
                    None
                };
                Some(ImportSite {
                    namespace,
                    alias,
                    node,
                })
            })
            .collect()
    }

    fn first_query(&self) -> Option<SyntaxNode> {
        self.root
            .descendants()
            .find(|node| node.kind() == SyntaxKind::QUERY_EXPR)
    }
}

/// Snapshots C# buffers against a shared library table.
#[derive(Clone, Debug)]
pub struct CSharpSnapshotProvider {
    library: Arc<SymbolTable>,
}

impl CSharpSnapshotProvider {
    pub fn new(library: Arc<SymbolTable>) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &Arc<SymbolTable> {
        &self.library
    }
}

impl Default for CSharpSnapshotProvider {
    fn default() -> Self {
        Self::new(Arc::new(SymbolTable::standard()))
    }
}

impl SnapshotProvider for CSharpSnapshotProvider {
    type Snapshot = CSharpSnapshot;

    fn snapshot(&self, buffer: &SourceBuffer) -> Result<CSharpSnapshot, FixError> {
        CSharpSnapshot::new(buffer, self.library.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;

    fn snapshot(text: &str) -> CSharpSnapshot {
        CSharpSnapshotProvider::default()
            .snapshot(&SourceBuffer::new(FileId::new(0), "a.cs", text))
            .unwrap()
    }

    #[test]
    fn test_import_sites() {
        let snapshot = snapshot("using B;\nusing X = A.C;\nclass K {}");
        let sites = snapshot.imports();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].namespace, "B");
        assert!(sites[0].is_plain());
        assert_eq!(sites[1].namespace, "A.C");
        assert_eq!(sites[1].alias.as_deref(), Some("X"));
        assert_eq!(snapshot.start(&sites[1].node), LineCol::new(1, 0));
    }

    #[test]
    fn test_parse_failure_names_the_file() {
        let err = CSharpSnapshotProvider::default()
            .snapshot(&SourceBuffer::new(FileId::new(0), "bad.cs", "class A { $ }"))
            .unwrap_err();
        assert!(matches!(err, FixError::Parse { ref file, .. } if &**file == "bad.cs"));
        assert_eq!(err.to_string(), "cannot parse bad.cs: unexpected character \"$\" at offset 10");
    }

    #[test]
    fn test_first_query() {
        let snapshot = snapshot("class A { void M(int[] xs) { var q = from x in xs select x; } }");
        let query = snapshot.first_query().unwrap();
        assert!(snapshot.text(&query).starts_with("from x in xs"));
    }
}
