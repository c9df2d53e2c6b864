//! Which using directives a buffer actually needs.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::resolve::{Binding, Resolver};
use super::symbols::LINQ_NAMESPACE;
use crate::syntax::ast;
use crate::syntax::{SyntaxKind, SyntaxNode};

/// Namespaces and aliases that bind at least one reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportUsage {
    namespaces: FxHashSet<SmolStr>,
    aliases: FxHashSet<SmolStr>,
}

impl ImportUsage {
    /// Walk every reference under `root` and record the imports it binds
    /// through.
    pub fn compute(resolver: &Resolver<'_>, root: &SyntaxNode) -> Self {
        let mut usage = Self::default();

        for node in root.descendants() {
            match node.kind() {
                SyntaxKind::NAME_REF if resolver.is_identifier_position(&node) => {
                    let name = ast::compact_text(&node);
                    match resolver.lookup(&node, &name) {
                        Some(Binding::Type {
                            import: Some(namespace),
                            ..
                        }) => {
                            usage.namespaces.insert(namespace);
                        }
                        Some(Binding::StaticImport { target }) => {
                            usage.namespaces.insert(target);
                        }
                        Some(Binding::Alias { alias, .. }) => {
                            usage.aliases.insert(alias);
                        }
                        _ => {}
                    }
                }
                SyntaxKind::MEMBER_ACCESS => {
                    if let (_, Some(namespace)) = resolver.resolve_member_access(&node) {
                        usage.namespaces.insert(namespace);
                    }
                }
                SyntaxKind::QUERY_EXPR => {
                    usage.namespaces.insert(SmolStr::new(LINQ_NAMESPACE));
                }
                _ => {}
            }
        }

        usage
    }

    /// Whether a `USING_DIRECTIVE` binds anything.
    pub fn is_used(&self, directive: &SyntaxNode) -> bool {
        if ast::is_alias_using(directive) {
            return ast::name_text(directive).is_some_and(|alias| self.aliases.contains(&alias));
        }
        ast::namespace_name(directive).is_some_and(|namespace| self.namespaces.contains(&namespace))
    }

    /// Whether `namespace` binds anything.
    pub fn uses_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{ImportScope, SymbolTable, Symbols};
    use crate::syntax::parse;

    fn usage(text: &str) -> (SyntaxNode, ImportUsage) {
        let root = parse(text).unwrap().syntax();
        let library = SymbolTable::standard();
        let local = SymbolTable::collect(&root);
        let imports = ImportScope::collect(&root);
        let resolver = Resolver::new(Symbols::new(&library, &local), &imports);
        let usage = ImportUsage::compute(&resolver, &root);
        (root, usage)
    }

    fn directives(root: &SyntaxNode) -> Vec<SyntaxNode> {
        root.descendants()
            .filter(|n| n.kind() == SyntaxKind::USING_DIRECTIVE)
            .collect()
    }

    #[test]
    fn test_unused_namespace() {
        let (root, usage) = usage("using System;\npublic class {}");
        assert!(!usage.is_used(&directives(&root)[0]));
    }

    #[test]
    fn test_type_and_extension_usage() {
        let (root, usage) = usage(
            "using System.Text;\nusing System.Linq;\nusing System.IO;\nclass A { void M(int[] xs) { var b = new StringBuilder(); var s = \"a\".Where(c => c == 'a'); } }",
        );
        let used: Vec<bool> = directives(&root).iter().map(|d| usage.is_used(d)).collect();
        assert_eq!(used, vec![true, true, false]);
    }

    #[test]
    fn test_query_syntax_uses_linq() {
        let (_, usage) = usage("class A { void M(int[] xs) { var q = from x in xs select x; } }");
        assert!(usage.uses_namespace(LINQ_NAMESPACE));
    }

    #[test]
    fn test_alias_usage() {
        let (root, usage) = usage(
            "using IO = System.IO;\nusing Text = System.Text;\nclass A { void M() { IO.File.Exists(\"a\"); } }",
        );
        let used: Vec<bool> = directives(&root).iter().map(|d| usage.is_used(d)).collect();
        assert_eq!(used, vec![true, false]);
    }
}
