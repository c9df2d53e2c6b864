//! Lexer for the C# subset, built on logos.

use logos::Logos;

use super::SyntaxError;
use super::kind::SyntaxKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    #[token("/*", block_comment)]
    // Preprocessor directives carry no names the fixer cares about.
    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    String,

    #[regex(r"'([^'\\\n]|\\.)'")]
    Char,

    #[regex(r"[0-9]+(\.[0-9]+)?[fFdDmMlLuU]?")]
    Number,

    #[token("using")]
    Using,
    #[token("namespace")]
    Namespace,
    #[token("class")]
    Class,
    #[token("static")]
    Static,
    #[token("public")]
    #[token("private")]
    #[token("protected")]
    #[token("internal")]
    #[token("abstract")]
    #[token("sealed")]
    #[token("override")]
    #[token("virtual")]
    #[token("readonly")]
    #[token("async")]
    #[token("partial")]
    #[token("const")]
    #[token("extern")]
    #[token("ref")]
    #[token("out")]
    #[token("params")]
    Modifier,
    #[token("new")]
    New,
    #[token("var")]
    Var,
    #[token("this")]
    This,
    #[token("base")]
    Base,
    #[token("return")]
    Return,
    #[token("void")]
    Void,
    #[token("from")]
    From,
    #[token("in")]
    In,
    #[token("select")]
    Select,
    #[token("where")]
    Where,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("foreach")]
    Foreach,
    #[token("await")]
    Await,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("string")]
    #[token("int")]
    #[token("bool")]
    #[token("object")]
    #[token("double")]
    #[token("long")]
    #[token("char")]
    #[token("byte")]
    #[token("float")]
    #[token("decimal")]
    PredefinedType,

    #[token("{")]
    LCurly,
    #[token("}")]
    RCurly,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token(";")]
    Semicolon,
    #[token(".")]
    #[token("?.")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token(":")]
    Colon,
    #[token("=>")]
    FatArrow,
    #[regex(r"==|!=|<=|>=|&&|\|\||\+\+|--|\+=|-=|\*=|/=|\?\?|[+\-*/%!?&|\^~]")]
    Op,
}

/// Consume a block comment up to and including `*/`; unterminated ones fail.
fn block_comment(lex: &mut logos::Lexer<'_, Token>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

impl Token {
    fn kind(self) -> SyntaxKind {
        match self {
            Token::Whitespace => SyntaxKind::WHITESPACE,
            Token::Comment => SyntaxKind::COMMENT,
            Token::Ident => SyntaxKind::IDENT,
            Token::String => SyntaxKind::STRING,
            Token::Char => SyntaxKind::CHAR,
            Token::Number => SyntaxKind::NUMBER,
            Token::Using => SyntaxKind::USING_KW,
            Token::Namespace => SyntaxKind::NAMESPACE_KW,
            Token::Class => SyntaxKind::CLASS_KW,
            Token::Static => SyntaxKind::STATIC_KW,
            Token::Modifier => SyntaxKind::MODIFIER_KW,
            Token::New => SyntaxKind::NEW_KW,
            Token::Var => SyntaxKind::VAR_KW,
            Token::This => SyntaxKind::THIS_KW,
            Token::Base => SyntaxKind::BASE_KW,
            Token::Return => SyntaxKind::RETURN_KW,
            Token::Void => SyntaxKind::VOID_KW,
            Token::From => SyntaxKind::FROM_KW,
            Token::In => SyntaxKind::IN_KW,
            Token::Select => SyntaxKind::SELECT_KW,
            Token::Where => SyntaxKind::WHERE_KW,
            Token::If => SyntaxKind::IF_KW,
            Token::Else => SyntaxKind::ELSE_KW,
            Token::While => SyntaxKind::WHILE_KW,
            Token::Foreach => SyntaxKind::FOREACH_KW,
            Token::Await => SyntaxKind::AWAIT_KW,
            Token::True => SyntaxKind::TRUE_KW,
            Token::False => SyntaxKind::FALSE_KW,
            Token::Null => SyntaxKind::NULL_KW,
            Token::PredefinedType => SyntaxKind::PREDEFINED_TYPE,
            Token::LCurly => SyntaxKind::L_CURLY,
            Token::RCurly => SyntaxKind::R_CURLY,
            Token::LParen => SyntaxKind::L_PAREN,
            Token::RParen => SyntaxKind::R_PAREN,
            Token::LBrack => SyntaxKind::L_BRACK,
            Token::RBrack => SyntaxKind::R_BRACK,
            Token::LAngle => SyntaxKind::L_ANGLE,
            Token::RAngle => SyntaxKind::R_ANGLE,
            Token::Semicolon => SyntaxKind::SEMICOLON,
            Token::Dot => SyntaxKind::DOT,
            Token::Comma => SyntaxKind::COMMA,
            Token::Eq => SyntaxKind::EQ,
            Token::Colon => SyntaxKind::COLON,
            Token::FatArrow => SyntaxKind::FAT_ARROW,
            Token::Op => SyntaxKind::OP,
        }
    }
}

/// A lexed token: its kind and the exact source slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexToken<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Split `text` into tokens, trivia included.
///
/// Concatenating the token texts reproduces `text` exactly.
pub fn tokenize(text: &str) -> Result<Vec<LexToken<'_>>, SyntaxError> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(LexToken {
                kind: token.kind(),
                text: lexer.slice(),
            }),
            Err(()) => {
                return Err(SyntaxError::UnexpectedCharacter {
                    offset: lexer.span().start,
                    text: lexer.slice().to_owned(),
                });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_using_directive_tokens() {
        assert_eq!(
            kinds("using System.Linq;"),
            vec![
                SyntaxKind::USING_KW,
                SyntaxKind::IDENT,
                SyntaxKind::DOT,
                SyntaxKind::IDENT,
                SyntaxKind::SEMICOLON,
            ]
        );
    }

    #[test]
    fn test_keywords_do_not_swallow_identifiers() {
        assert_eq!(kinds("usingX classy"), vec![SyntaxKind::IDENT, SyntaxKind::IDENT]);
        assert_eq!(kinds("string"), vec![SyntaxKind::PREDEFINED_TYPE]);
    }

    #[test]
    fn test_operators_and_arrows() {
        assert_eq!(
            kinds("x => x >= 1 ?. y"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::FAT_ARROW,
                SyntaxKind::IDENT,
                SyntaxKind::OP,
                SyntaxKind::NUMBER,
                SyntaxKind::DOT,
                SyntaxKind::IDENT,
            ]
        );
    }

    #[test]
    fn test_tokens_are_lossless() {
        let text = "// lead\nclass A { /* x */ string s = \"a\\\"b\"; }\n";
        let joined: String = tokenize(text).unwrap().iter().map(|t| t.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_block_comments_are_trivia() {
        assert_eq!(
            kinds("/* header */ class /** doc\n * more */ A /***/"),
            vec![SyntaxKind::CLASS_KW, SyntaxKind::IDENT]
        );
        let tokens = tokenize("a /* x * y */ b").unwrap();
        assert_eq!(tokens[2].kind, SyntaxKind::COMMENT);
        assert_eq!(tokens[2].text, "/* x * y */");
    }

    #[test]
    fn test_unterminated_block_comment_is_an_error() {
        let err = tokenize("class A { /* open").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedCharacter { offset: 10, .. }));
    }

    #[test]
    fn test_preprocessor_lines_are_trivia() {
        assert_eq!(
            kinds("#region Fields\nint x;\n#endregion\n"),
            vec![SyntaxKind::PREDEFINED_TYPE, SyntaxKind::IDENT, SyntaxKind::SEMICOLON]
        );
    }

    #[test]
    fn test_unexpected_character_is_an_error() {
        let err = tokenize("class A { $ }").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedCharacter {
                offset: 10,
                text: "$".to_owned(),
            }
        );
    }
}
