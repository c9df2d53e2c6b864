//! Name resolution: binding name references against scopes, imports and
//! symbol tables.
//!
//! Resolution is deliberately shallow. It only has to answer one question
//! per node: would adding an import change whether this reference binds?
//! References it cannot classify are reported as [`ResolutionOutcome::Resolved`]
//! so that one unknown receiver does not cascade into member reports.
//!
//! # Lookup order for an identifier
//!
//! 1. Lambda, query, `foreach` and `using` variables, parameters and locals
//! 2. Members, type parameters and the name of each enclosing class
//! 3. Contextual keywords the lexer treats as identifiers
//! 4. Types in the enclosing namespaces, innermost first, then the global one
//! 5. Namespaces reachable from the enclosing namespaces
//! 6. Using aliases
//! 7. Types from plain usings, then members from `using static`

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::symbols::{OBJECT_MEMBERS, Symbols, TypeInfo, array_type, predefined_type};
use crate::syntax::ast;
use crate::syntax::{SyntaxKind, SyntaxNode};

/// Receiver inference gives up past this many hops.
const MAX_INFERENCE_DEPTH: u32 = 8;

/// Identifiers the lexer does not reserve but which never need an import.
const CONTEXTUAL_KEYWORDS: &[&str] = &[
    "_", "add", "as", "ascending", "break", "by", "case", "catch", "checked", "continue",
    "default", "delegate", "descending", "do", "dynamic", "enum", "equals", "event",
    "explicit", "finally", "for", "get", "global", "goto", "group", "implicit", "init",
    "interface", "into", "is", "join", "let", "lock", "nameof", "on", "operator", "orderby",
    "record", "remove", "set", "sizeof", "struct", "switch", "throw", "try", "typeof",
    "unchecked", "value", "when", "with", "yield",
];

// ============================================================================
// OUTCOMES
// ============================================================================

/// How a node resolves in the current snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolutionOutcome {
    /// Binds, or is not a reference at all.
    Resolved,
    /// A simple name that nothing in scope declares.
    UnknownIdentifier { name: SmolStr },
    /// A member the receiver does not have.
    UnknownMember { member_name: SmolStr },
}

impl ResolutionOutcome {
    /// Whether the node binds.
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved)
    }

    /// The unbound name, if any.
    pub fn symbol_name(&self) -> Option<&SmolStr> {
        match self {
            ResolutionOutcome::Resolved => None,
            ResolutionOutcome::UnknownIdentifier { name } => Some(name),
            ResolutionOutcome::UnknownMember { member_name } => Some(member_name),
        }
    }
}

/// What an identifier binds to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding<'a> {
    /// A local, parameter, range variable or type parameter; holds the
    /// declaring node.
    Local(SyntaxNode),
    /// A member of an enclosing class; holds the member declaration.
    Member(SyntaxNode),
    /// A type, with the import that made it visible if any.
    Type {
        info: &'a TypeInfo,
        import: Option<SmolStr>,
    },
    /// A namespace, fully qualified.
    Namespace(SmolStr),
    /// A using alias.
    Alias { alias: SmolStr, target: SmolStr },
    /// A member brought in by `using static`.
    StaticImport { target: SmolStr },
    /// A contextual keyword, or an enclosing class not in any table.
    Builtin,
}

// ============================================================================
// IMPORT SCOPE
// ============================================================================

/// The using directives of one buffer.
///
/// Directives apply to the whole buffer regardless of where they appear.
#[derive(Clone, Debug, Default)]
pub struct ImportScope {
    namespaces: Vec<SmolStr>,
    aliases: FxHashMap<SmolStr, SmolStr>,
    statics: Vec<SmolStr>,
}

impl ImportScope {
    /// Collect every using directive under `root`.
    pub fn collect(root: &SyntaxNode) -> Self {
        let mut scope = Self::default();

        for directive in root
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::USING_DIRECTIVE)
        {
            let Some(target) = ast::namespace_name(&directive) else {
                continue;
            };
            if ast::is_alias_using(&directive) {
                if let Some(alias) = ast::name_text(&directive) {
                    scope.aliases.insert(alias, target);
                }
            } else if ast::is_static_using(&directive) {
                scope.statics.push(target);
            } else if !scope.namespaces.contains(&target) {
                scope.namespaces.push(target);
            }
        }

        scope
    }

    /// Plainly imported namespaces, in directive order.
    pub fn namespaces(&self) -> &[SmolStr] {
        &self.namespaces
    }

    /// Whether `namespace` is plainly imported.
    pub fn imports_namespace(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }

    /// Target of an alias.
    pub fn alias(&self, name: &str) -> Option<&SmolStr> {
        self.aliases.get(name)
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// What a member access receiver turned out to be.
enum Receiver<'a> {
    Namespace(SmolStr),
    Type(Cow<'a, TypeInfo>),
    Value(Cow<'a, TypeInfo>),
    Unknown,
}

/// Where a `NAME_REF` sits.
enum NameRefPosition {
    /// A simple name in expression or type position.
    Identifier,
    /// The member name of a member access.
    Member,
    /// The tail of a qualified type path; holds the qualifier.
    QualifiedTail(SyntaxNode),
}

/// Query-time resolver over one snapshot.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    symbols: Symbols<'a>,
    imports: &'a ImportScope,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over the given symbols and imports.
    pub fn new(symbols: Symbols<'a>, imports: &'a ImportScope) -> Self {
        Self { symbols, imports }
    }

    /// The symbol view.
    pub fn symbols(&self) -> Symbols<'a> {
        self.symbols
    }

    /// The import scope.
    pub fn imports(&self) -> &'a ImportScope {
        self.imports
    }

    /// Classify any node. Only name references and member accesses can be
    /// unresolved.
    pub fn resolve(&self, node: &SyntaxNode) -> ResolutionOutcome {
        match node.kind() {
            SyntaxKind::NAME_REF => self.resolve_name_ref(node),
            SyntaxKind::MEMBER_ACCESS => self.resolve_member_access(node).0,
            _ => ResolutionOutcome::Resolved,
        }
    }

    /// Whether a `NAME_REF` is looked up as a simple name.
    pub fn is_identifier_position(&self, name_ref: &SyntaxNode) -> bool {
        matches!(name_ref_position(name_ref), NameRefPosition::Identifier)
    }

    fn resolve_name_ref(&self, node: &SyntaxNode) -> ResolutionOutcome {
        let name = ast::compact_text(node);
        match name_ref_position(node) {
            NameRefPosition::Member => ResolutionOutcome::Resolved,
            NameRefPosition::QualifiedTail(qualifier) => match self.classify(&qualifier, 0) {
                Receiver::Namespace(namespace)
                    if self.symbols.type_in(&namespace, &name).is_none()
                        && !self.symbols.is_namespace(&join(&namespace, &name)) =>
                {
                    ResolutionOutcome::UnknownMember { member_name: name }
                }
                _ => ResolutionOutcome::Resolved,
            },
            NameRefPosition::Identifier => {
                if self.lookup(node, &name).is_some() || self.may_be_inherited(node, &name) {
                    ResolutionOutcome::Resolved
                } else {
                    ResolutionOutcome::UnknownIdentifier { name }
                }
            }
        }
    }

    /// Resolve a member access, also reporting the import that supplied an
    /// extension method when one did.
    pub fn resolve_member_access(&self, node: &SyntaxNode) -> (ResolutionOutcome, Option<SmolStr>) {
        let resolved = (ResolutionOutcome::Resolved, None);
        let Some(member) = node.children().filter(|c| c.kind() == SyntaxKind::NAME_REF).last() else {
            return resolved;
        };
        let Some(receiver) = node.first_child().filter(|receiver| *receiver != member) else {
            return resolved;
        };
        let name = ast::compact_text(&member);
        let unknown = (
            ResolutionOutcome::UnknownMember {
                member_name: name.clone(),
            },
            None,
        );

        match self.classify(&receiver, 0) {
            Receiver::Namespace(namespace) => {
                if self.symbols.type_in(&namespace, &name).is_some()
                    || self.symbols.is_namespace(&join(&namespace, &name))
                {
                    resolved
                } else {
                    unknown
                }
            }
            Receiver::Type(info) => {
                if info.has_member(&name) || info.has_base || matches!(name.as_str(), "Equals" | "ReferenceEquals") {
                    resolved
                } else {
                    unknown
                }
            }
            Receiver::Value(info) => {
                if info.has_member(&name) || OBJECT_MEMBERS.contains(&name.as_str()) {
                    return resolved;
                }
                if let Some(import) = self
                    .imports
                    .namespaces()
                    .iter()
                    .find(|namespace| self.symbols.extension_in(namespace, &name))
                {
                    return (ResolutionOutcome::Resolved, Some(import.clone()));
                }
                let enclosing = ast::enclosing_namespace(node);
                if namespace_chain(&enclosing).any(|namespace| self.symbols.extension_in(namespace, &name))
                    || info.has_base
                {
                    resolved
                } else {
                    unknown
                }
            }
            Receiver::Unknown => resolved,
        }
    }

    /// Look up a simple name as seen from `node`.
    pub fn lookup(&self, node: &SyntaxNode, name: &str) -> Option<Binding<'a>> {
        for ancestor in node.ancestors().skip(1) {
            if let Some(binding) = self.lookup_in_scope(&ancestor, name) {
                return Some(binding);
            }
        }

        if CONTEXTUAL_KEYWORDS.contains(&name) {
            return Some(Binding::Builtin);
        }

        let enclosing = ast::enclosing_namespace(node);
        for namespace in namespace_chain(&enclosing) {
            if let Some(info) = self.symbols.type_in(namespace, name) {
                return Some(Binding::Type { info, import: None });
            }
        }
        for namespace in namespace_chain(&enclosing) {
            let candidate = join(namespace, name);
            if self.symbols.is_namespace(&candidate) {
                return Some(Binding::Namespace(SmolStr::new(candidate)));
            }
        }

        if let Some(target) = self.imports.alias(name) {
            return Some(Binding::Alias {
                alias: SmolStr::new(name),
                target: target.clone(),
            });
        }

        for namespace in self.imports.namespaces() {
            if let Some(info) = self.symbols.type_in(namespace, name) {
                return Some(Binding::Type {
                    info,
                    import: Some(namespace.clone()),
                });
            }
        }
        for target in &self.imports.statics {
            if self
                .symbols
                .type_by_path(target)
                .is_some_and(|info| info.has_member(name))
            {
                return Some(Binding::StaticImport {
                    target: target.clone(),
                });
            }
        }

        None
    }

    fn lookup_in_scope(&self, scope: &SyntaxNode, name: &str) -> Option<Binding<'a>> {
        let named = |node: &SyntaxNode| ast::name_text(node).is_some_and(|n| n == name);

        match scope.kind() {
            SyntaxKind::LAMBDA_EXPR => {
                let direct = ast::children_of_kind(scope, SyntaxKind::PARAM);
                let listed = ast::child_of_kind(scope, SyntaxKind::PARAM_LIST)
                    .into_iter()
                    .flat_map(|list| list.children().filter(|c| c.kind() == SyntaxKind::PARAM));
                direct.chain(listed).find(named).map(Binding::Local)
            }
            SyntaxKind::QUERY_EXPR => ast::children_of_kind(scope, SyntaxKind::FROM_CLAUSE)
                .find(named)
                .map(Binding::Local),
            SyntaxKind::FOREACH_STMT => named(scope).then(|| Binding::Local(scope.clone())),
            SyntaxKind::USING_STMT => ast::children_of_kind(scope, SyntaxKind::LOCAL_DECL)
                .find(|decl| declares(decl, name))
                .map(Binding::Local),
            SyntaxKind::BLOCK => scope
                .children()
                .flat_map(|stmt| match stmt.kind() {
                    SyntaxKind::USING_STMT => ast::child_of_kind(&stmt, SyntaxKind::LOCAL_DECL),
                    SyntaxKind::LOCAL_DECL => Some(stmt),
                    _ => None,
                })
                .find(|decl| declares(decl, name))
                .map(Binding::Local),
            SyntaxKind::METHOD_DECL => {
                let param = ast::child_of_kind(scope, SyntaxKind::PARAM_LIST)
                    .and_then(|list| ast::children_of_kind(&list, SyntaxKind::PARAM).find(named));
                param
                    .or_else(|| type_param_scope(scope, name))
                    .map(Binding::Local)
            }
            SyntaxKind::CLASS_DECL => {
                if named(scope) {
                    let namespace = ast::enclosing_namespace(scope);
                    return Some(match self.symbols.type_in(&namespace, name) {
                        Some(info) => Binding::Type { info, import: None },
                        None => Binding::Builtin,
                    });
                }
                if let Some(params) = type_param_scope(scope, name) {
                    return Some(Binding::Local(params));
                }
                scope
                    .children()
                    .find(|member| match member.kind() {
                        SyntaxKind::FIELD_DECL => declares(member, name),
                        SyntaxKind::METHOD_DECL | SyntaxKind::CLASS_DECL => named(member),
                        _ => false,
                    })
                    .map(Binding::Member)
            }
            _ => None,
        }
    }

    /// An unknown name inside a class with a base list may be inherited,
    /// unless it is a type some namespace declares.
    fn may_be_inherited(&self, node: &SyntaxNode, name: &str) -> bool {
        if node.ancestors().any(|ancestor| ancestor.kind() == SyntaxKind::BASE_LIST) {
            return false;
        }
        let has_base = node.ancestors().any(|ancestor| {
            ancestor.kind() == SyntaxKind::CLASS_DECL
                && ast::child_of_kind(&ancestor, SyntaxKind::BASE_LIST).is_some()
        });
        has_base
            && self.symbols.namespaces_with_type(name).is_empty()
            && self.symbols.namespaces_with_extension(name).is_empty()
    }

    // ========================================================================
    // RECEIVER INFERENCE
    // ========================================================================

    fn classify(&self, expr: &SyntaxNode, depth: u32) -> Receiver<'a> {
        if depth > MAX_INFERENCE_DEPTH {
            return Receiver::Unknown;
        }

        match expr.kind() {
            SyntaxKind::NAME_REF => {
                let name = ast::compact_text(expr);
                match self.lookup(expr, &name) {
                    Some(Binding::Namespace(namespace)) => Receiver::Namespace(namespace),
                    Some(Binding::Alias { target, .. }) => match self.symbols.type_by_path(&target) {
                        Some(info) => Receiver::Type(Cow::Borrowed(info)),
                        None if self.symbols.is_namespace(&target) => Receiver::Namespace(target),
                        None => Receiver::Unknown,
                    },
                    Some(Binding::Type { info, .. }) => Receiver::Type(Cow::Borrowed(info)),
                    Some(Binding::Local(decl)) | Some(Binding::Member(decl)) => self
                        .declared_type(&decl, &name, depth + 1)
                        .map_or(Receiver::Unknown, Receiver::Value),
                    _ => Receiver::Unknown,
                }
            }
            // A qualified type path used as a receiver
            SyntaxKind::PATH => match expr.first_child() {
                Some(qualifier) if qualifier.kind() == SyntaxKind::PATH => {
                    let tail = expr.children().filter(|c| c.kind() == SyntaxKind::NAME_REF).last();
                    match (self.classify(&qualifier, depth + 1), tail) {
                        (Receiver::Namespace(namespace), Some(tail)) => {
                            self.namespace_member(&namespace, &ast::compact_text(&tail))
                        }
                        _ => Receiver::Unknown,
                    }
                }
                Some(head) => self.classify(&head, depth + 1),
                None => Receiver::Unknown,
            },
            SyntaxKind::LITERAL => {
                let keyword = if ast::has_token(expr, SyntaxKind::STRING) {
                    "string"
                } else if ast::has_token(expr, SyntaxKind::CHAR) {
                    "char"
                } else if ast::has_token(expr, SyntaxKind::NUMBER) {
                    "int"
                } else if ast::has_token(expr, SyntaxKind::TRUE_KW) || ast::has_token(expr, SyntaxKind::FALSE_KW) {
                    "bool"
                } else {
                    return Receiver::Unknown;
                };
                Receiver::Value(Cow::Owned(predefined_type(keyword)))
            }
            SyntaxKind::THIS_EXPR if ast::has_token(expr, SyntaxKind::THIS_KW) => expr
                .ancestors()
                .find(|ancestor| ancestor.kind() == SyntaxKind::CLASS_DECL)
                .and_then(|class| {
                    let name = ast::name_text(&class)?;
                    self.symbols.type_in(&ast::enclosing_namespace(&class), &name)
                })
                .map_or(Receiver::Unknown, |info| Receiver::Value(Cow::Borrowed(info))),
            SyntaxKind::OBJECT_CREATION => ast::child_of_kind(expr, SyntaxKind::TYPE)
                .and_then(|ty| self.type_of(&ty))
                .map_or(Receiver::Unknown, Receiver::Value),
            SyntaxKind::PAREN_EXPR => expr
                .first_child()
                .map_or(Receiver::Unknown, |inner| self.classify(&inner, depth + 1)),
            SyntaxKind::MEMBER_ACCESS => {
                let member = expr.children().filter(|c| c.kind() == SyntaxKind::NAME_REF).last();
                let receiver = expr.first_child();
                match (receiver, member) {
                    (Some(receiver), Some(member)) if receiver != member => {
                        match self.classify(&receiver, depth + 1) {
                            Receiver::Namespace(namespace) => {
                                self.namespace_member(&namespace, &ast::compact_text(&member))
                            }
                            _ => Receiver::Unknown,
                        }
                    }
                    _ => Receiver::Unknown,
                }
            }
            SyntaxKind::TYPE => ast::token_of_kind(expr, SyntaxKind::PREDEFINED_TYPE)
                .map_or(Receiver::Unknown, |keyword| {
                    Receiver::Type(Cow::Owned(predefined_type(keyword.text())))
                }),
            _ => Receiver::Unknown,
        }
    }

    fn namespace_member(&self, namespace: &str, name: &str) -> Receiver<'a> {
        if let Some(info) = self.symbols.type_in(namespace, name) {
            return Receiver::Type(Cow::Borrowed(info));
        }
        let nested = join(namespace, name);
        if self.symbols.is_namespace(&nested) {
            Receiver::Namespace(SmolStr::new(nested))
        } else {
            Receiver::Unknown
        }
    }

    fn declared_type(&self, decl: &SyntaxNode, name: &str, depth: u32) -> Option<Cow<'a, TypeInfo>> {
        match decl.kind() {
            SyntaxKind::LOCAL_DECL | SyntaxKind::FIELD_DECL => {
                if let Some(ty) = ast::child_of_kind(decl, SyntaxKind::TYPE) {
                    return self.type_of(&ty);
                }
                // `var`: infer from the initializer following the name
                let initializer = decl
                    .children()
                    .skip_while(|child| {
                        !(child.kind() == SyntaxKind::NAME && ast::compact_text(child) == name)
                    })
                    .nth(1)
                    .filter(|child| child.kind() != SyntaxKind::NAME)?;
                match self.classify(&initializer, depth) {
                    Receiver::Value(info) => Some(info),
                    _ => None,
                }
            }
            SyntaxKind::PARAM | SyntaxKind::FOREACH_STMT => {
                ast::child_of_kind(decl, SyntaxKind::TYPE).and_then(|ty| self.type_of(&ty))
            }
            _ => None,
        }
    }

    /// The type a `TYPE` node denotes, when known.
    pub fn type_of(&self, ty: &SyntaxNode) -> Option<Cow<'a, TypeInfo>> {
        if ast::has_token(ty, SyntaxKind::L_BRACK) {
            return Some(Cow::Owned(array_type()));
        }
        if let Some(keyword) = ast::token_of_kind(ty, SyntaxKind::PREDEFINED_TYPE) {
            return Some(Cow::Owned(predefined_type(keyword.text())));
        }
        let path = ast::child_of_kind(ty, SyntaxKind::PATH)?;
        match self.classify(&path, 0) {
            Receiver::Type(info) => Some(info),
            _ => None,
        }
    }
}

fn name_ref_position(name_ref: &SyntaxNode) -> NameRefPosition {
    let Some(parent) = name_ref.parent() else {
        return NameRefPosition::Identifier;
    };
    if !follows_dot(name_ref) {
        return NameRefPosition::Identifier;
    }
    match parent.kind() {
        SyntaxKind::MEMBER_ACCESS => NameRefPosition::Member,
        SyntaxKind::PATH => match parent.first_child() {
            Some(qualifier) if qualifier.kind() == SyntaxKind::PATH => {
                NameRefPosition::QualifiedTail(qualifier)
            }
            _ => NameRefPosition::Identifier,
        },
        _ => NameRefPosition::Identifier,
    }
}

fn follows_dot(node: &SyntaxNode) -> bool {
    let mut previous = node.prev_sibling_or_token();
    while let Some(element) = previous {
        if element.kind() == SyntaxKind::DOT {
            return true;
        }
        if !element.kind().is_trivia() {
            return false;
        }
        previous = element.prev_sibling_or_token();
    }
    false
}

fn declares(decl: &SyntaxNode, name: &str) -> bool {
    ast::children_of_kind(decl, SyntaxKind::NAME).any(|n| ast::compact_text(&n) == name)
}

fn type_param_scope(scope: &SyntaxNode, name: &str) -> Option<SyntaxNode> {
    ast::child_of_kind(scope, SyntaxKind::TYPE_PARAM_LIST).filter(|params| declares(params, name))
}

fn join(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_owned()
    } else {
        format!("{namespace}.{name}")
    }
}

/// `A.B.C` → `A.B.C`, `A.B`, `A`, then the global namespace.
pub fn namespace_chain(namespace: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(namespace);
    std::iter::from_fn(move || {
        let current = next?;
        next = if current.is_empty() {
            None
        } else {
            Some(current.rsplit_once('.').map_or("", |(parent, _)| parent))
        };
        Some(current)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::SymbolTable;
    use crate::syntax::parse;

    struct Fixture {
        root: SyntaxNode,
        library: SymbolTable,
        local: SymbolTable,
        imports: ImportScope,
    }

    impl Fixture {
        fn new(text: &str) -> Self {
            let root = parse(text).unwrap().syntax();
            Self {
                library: SymbolTable::standard(),
                local: SymbolTable::collect(&root),
                imports: ImportScope::collect(&root),
                root,
            }
        }

        fn resolver(&self) -> Resolver<'_> {
            Resolver::new(Symbols::new(&self.library, &self.local), &self.imports)
        }

        fn unresolved(&self) -> Vec<ResolutionOutcome> {
            let resolver = self.resolver();
            self.root
                .descendants()
                .map(|node| resolver.resolve(&node))
                .filter(|outcome| !outcome.is_resolved())
                .collect()
        }
    }

    fn ident(name: &str) -> ResolutionOutcome {
        ResolutionOutcome::UnknownIdentifier { name: name.into() }
    }

    fn member(name: &str) -> ResolutionOutcome {
        ResolutionOutcome::UnknownMember {
            member_name: name.into(),
        }
    }

    #[test]
    fn test_namespace_chain() {
        assert_eq!(namespace_chain("A.B.C").collect::<Vec<_>>(), vec!["A.B.C", "A.B", "A", ""]);
        assert_eq!(namespace_chain("").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_unimported_type_is_unknown_identifier() {
        let fixture = Fixture::new(
            "public class test {\n    class1 ns1 = new class1();\n}\nnamespace ns1 { public class class1 {} }",
        );
        assert_eq!(fixture.unresolved(), vec![ident("class1"), ident("class1")]);
    }

    #[test]
    fn test_imported_type_resolves() {
        let fixture = Fixture::new(
            "using ns1;\npublic class test {\n    class1 a = new class1();\n}\nnamespace ns1 { public class class1 {} }",
        );
        assert!(fixture.unresolved().is_empty());
    }

    #[test]
    fn test_locals_params_and_members_resolve() {
        let fixture = Fixture::new(
            "class A {\n int field;\n void M(int p) {\n var x = p;\n foreach (var y in Items()) { x = y + field; }\n Func2(q => q);\n }\n int Items() { return 0; }\n void Func2(object f) {}\n}",
        );
        assert!(fixture.unresolved().is_empty(), "{:?}", fixture.unresolved());
    }

    #[test]
    fn test_static_member_of_unimported_type() {
        let fixture = Fixture::new("class A { void M() { Console.WriteLine(\"x\"); } }");
        assert_eq!(fixture.unresolved(), vec![ident("Console")]);

        let fixture = Fixture::new("using System;\nclass A { void M() { Console.WriteLine(\"x\"); Console.Nope(); } }");
        assert_eq!(fixture.unresolved(), vec![member("Nope")]);
    }

    #[test]
    fn test_extension_method_on_literal() {
        let text = "class A { void M() { \"s\".Whatever(); \"s\".Trim(); } }\nnamespace ns1 { static class E { public static void Whatever(this string s) {} } }";
        let fixture = Fixture::new(text);
        assert_eq!(fixture.unresolved(), vec![member("Whatever")]);

        let fixture = Fixture::new(&format!("using ns1;\n{text}"));
        assert!(fixture.unresolved().is_empty());
    }

    #[test]
    fn test_extension_visible_from_enclosing_namespace() {
        let fixture = Fixture::new(
            "namespace ns1 {\n static class E { public static void Whatever(this string s) {} }\n class A { void M() { \"s\".Whatever(); } }\n}",
        );
        assert!(fixture.unresolved().is_empty());
    }

    #[test]
    fn test_linq_operator_needs_import() {
        let fixture = Fixture::new(
            "using System.Collections.Generic;\nclass A { void M() { var xs = new List<int>(); xs.Where(x => x > 1); xs.Add(1); } }",
        );
        assert_eq!(fixture.unresolved(), vec![member("Where")]);
    }

    #[test]
    fn test_qualified_names_resolve_without_imports() {
        let fixture = Fixture::new(
            "class A { System.Text.StringBuilder b = new System.Text.StringBuilder(); void M() { System.Console.WriteLine(b.Append(\"x\")); } }",
        );
        assert!(fixture.unresolved().is_empty(), "{:?}", fixture.unresolved());
    }

    #[test]
    fn test_missing_type_in_known_namespace() {
        let fixture = Fixture::new("class A { void M() { System.Nothing.Here(); } }");
        assert_eq!(fixture.unresolved(), vec![member("Nothing")]);
    }

    #[test]
    fn test_alias_and_static_usings() {
        let fixture = Fixture::new(
            "using IO = System.IO;\nusing static System.Math;\nclass A { void M() { IO.File.Exists(\"a\"); var x = Abs(1); } }",
        );
        assert!(fixture.unresolved().is_empty(), "{:?}", fixture.unresolved());
    }

    #[test]
    fn test_unknown_receiver_does_not_cascade() {
        let fixture = Fixture::new("class A { void M() { Mystery.Call().Other(); } }");
        assert_eq!(fixture.unresolved(), vec![ident("Mystery")]);
    }

    #[test]
    fn test_class_with_base_list_tolerates_inherited_names() {
        let fixture = Fixture::new("class A : Base { void M() { Inherited(); Console.Write(1); } }");
        assert_eq!(fixture.unresolved(), vec![ident("Base"), ident("Console")]);
    }

    #[test]
    fn test_contextual_keywords() {
        let fixture = Fixture::new("class A { void M() { throw new A(); } }");
        assert!(fixture.unresolved().is_empty());
    }
}
