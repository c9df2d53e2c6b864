//! Syntax kinds and the rowan language definition.

macro_rules! syntax_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Every token and node kind of the C# subset.
        ///
        /// Tokens come first, then nodes; `EOF` is a parser sentinel and never
        /// appears in a tree.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($kind),*
        }

        impl SyntaxKind {
            const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$kind),*];
        }
    };
}

syntax_kinds! {
    // Trivia
    WHITESPACE,
    COMMENT,

    // Literals and names
    IDENT,
    STRING,
    CHAR,
    NUMBER,

    // Keywords
    USING_KW,
    NAMESPACE_KW,
    CLASS_KW,
    STATIC_KW,
    MODIFIER_KW,
    NEW_KW,
    VAR_KW,
    THIS_KW,
    BASE_KW,
    RETURN_KW,
    VOID_KW,
    FROM_KW,
    IN_KW,
    SELECT_KW,
    WHERE_KW,
    IF_KW,
    ELSE_KW,
    WHILE_KW,
    FOREACH_KW,
    AWAIT_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    PREDEFINED_TYPE,

    // Punctuation
    L_CURLY,
    R_CURLY,
    L_PAREN,
    R_PAREN,
    L_BRACK,
    R_BRACK,
    L_ANGLE,
    R_ANGLE,
    SEMICOLON,
    DOT,
    COMMA,
    EQ,
    COLON,
    FAT_ARROW,
    OP,

    EOF,

    // Nodes: declarations
    SOURCE_FILE,
    USING_DIRECTIVE,
    NAMESPACE_NAME,
    NAMESPACE_DECL,
    ATTRIBUTE_LIST,
    CLASS_DECL,
    TYPE_PARAM_LIST,
    BASE_LIST,
    FIELD_DECL,
    ACCESSOR_LIST,
    METHOD_DECL,
    PARAM_LIST,
    PARAM,

    // Nodes: statements
    BLOCK,
    LOCAL_DECL,
    EXPR_STMT,
    RETURN_STMT,
    IF_STMT,
    WHILE_STMT,
    FOREACH_STMT,
    USING_STMT,

    // Nodes: types and names
    TYPE,
    PATH,
    TYPE_ARG_LIST,
    NAME,
    NAME_REF,

    // Nodes: expressions
    LITERAL,
    THIS_EXPR,
    MEMBER_ACCESS,
    INVOCATION,
    ELEMENT_ACCESS,
    ARG_LIST,
    OBJECT_CREATION,
    INITIALIZER,
    PAREN_EXPR,
    PREFIX_EXPR,
    LAMBDA_EXPR,
    BINARY_EXPR,
    QUERY_EXPR,
    FROM_CLAUSE,
    WHERE_CLAUSE,
    SELECT_CLAUSE,

    ERROR,
}

impl SyntaxKind {
    /// Whitespace and comments.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::WHITESPACE | SyntaxKind::COMMENT)
    }

    /// Convert from a raw rowan kind; unknown values map to `ERROR`.
    pub fn from_raw(raw: u16) -> Self {
        Self::ALL
            .get(raw as usize)
            .copied()
            .unwrap_or(SyntaxKind::ERROR)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

/// The rowan language tag for the C# subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharpLanguage {}

impl rowan::Language for CSharpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<CSharpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CSharpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CSharpLanguage>;
