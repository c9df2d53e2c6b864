//! Small accessors over untyped syntax nodes.

use smol_str::SmolStr;

use super::{SyntaxKind, SyntaxNode, SyntaxToken};

/// First child node of `kind`.
pub fn child_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|child| child.kind() == kind)
}

/// All child nodes of `kind`, in order.
pub fn children_of_kind(
    node: &SyntaxNode,
    kind: SyntaxKind,
) -> impl Iterator<Item = SyntaxNode> + '_ {
    node.children().filter(move |child| child.kind() == kind)
}

/// First direct child token of `kind`.
pub fn token_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == kind)
}

/// Whether `node` has a direct child token of `kind`.
pub fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    token_of_kind(node, kind).is_some()
}

/// Text of the `NAME` child of a declaration.
pub fn name_text(node: &SyntaxNode) -> Option<SmolStr> {
    child_of_kind(node, SyntaxKind::NAME).map(|name| compact_text(&name))
}

/// Concatenated significant tokens, so `System . Linq` reads `System.Linq`.
pub fn compact_text(node: &SyntaxNode) -> SmolStr {
    let mut text = String::new();
    for token in node
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
    {
        text.push_str(token.text());
    }
    SmolStr::from(text)
}

/// Namespace named by a using directive or namespace declaration.
pub fn namespace_name(node: &SyntaxNode) -> Option<SmolStr> {
    child_of_kind(node, SyntaxKind::NAMESPACE_NAME)
        .map(|name| compact_text(&name))
        .filter(|name| !name.is_empty())
}

/// Whether a using directive is an alias (`using X = A.B;`).
pub fn is_alias_using(node: &SyntaxNode) -> bool {
    has_token(node, SyntaxKind::EQ)
}

/// Whether a using directive is `using static`.
pub fn is_static_using(node: &SyntaxNode) -> bool {
    has_token(node, SyntaxKind::STATIC_KW)
}

/// Qualified name of the namespace enclosing `node`, empty for the global one.
pub fn enclosing_namespace(node: &SyntaxNode) -> String {
    let mut parts: Vec<SmolStr> = node
        .ancestors()
        .filter(|ancestor| ancestor.kind() == SyntaxKind::NAMESPACE_DECL)
        .filter_map(|decl| namespace_name(&decl))
        .collect();
    parts.reverse();
    parts.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    #[test]
    fn test_compact_text_drops_trivia() {
        let root = parse("using System . /* c */ Linq;").unwrap().syntax();
        let using = child_of_kind(&root, SyntaxKind::USING_DIRECTIVE).unwrap();
        assert_eq!(namespace_name(&using).as_deref(), Some("System.Linq"));
    }

    #[test]
    fn test_using_flavours() {
        let root = parse("using A = B.C;\nusing static D;\nusing E;").unwrap().syntax();
        let usings: Vec<_> = children_of_kind(&root, SyntaxKind::USING_DIRECTIVE).collect();
        assert!(is_alias_using(&usings[0]));
        assert_eq!(name_text(&usings[0]).as_deref(), Some("A"));
        assert!(is_static_using(&usings[1]));
        assert!(!is_alias_using(&usings[2]) && !is_static_using(&usings[2]));
    }

    #[test]
    fn test_enclosing_namespace_joins_nesting() {
        let root = parse("namespace A.B { namespace C { class D {} } }").unwrap().syntax();
        let class = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::CLASS_DECL)
            .unwrap();
        assert_eq!(enclosing_namespace(&class), "A.B.C");
        assert_eq!(enclosing_namespace(&root), "");
    }
}
