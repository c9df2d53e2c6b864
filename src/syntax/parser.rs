//! Error-tolerant recursive descent parser producing a lossless rowan tree.
//!
//! Trivia is attached to the enclosing node *before* a node starts, so every
//! node's range begins at its first significant token and ends at its last.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};

use super::SyntaxError;
use super::kind::{SyntaxKind, SyntaxKind::*, SyntaxNode};
use super::lexer::{LexToken, tokenize};

/// The green tree of one parsed buffer.
#[derive(Clone, Debug)]
pub struct Parse {
    green: GreenNode,
}

impl Parse {
    /// The root `SOURCE_FILE` node.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }
}

/// Parse a whole buffer.
///
/// Only lexical errors fail; syntax errors become `ERROR` nodes.
pub fn parse(text: &str) -> Result<Parse, SyntaxError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        builder: GreenNodeBuilder::new(),
    };
    parser.source_file();
    Ok(Parse {
        green: parser.builder.finish(),
    })
}

struct Parser<'t> {
    tokens: Vec<LexToken<'t>>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
}

// ============================================================================
// TOKEN CURSOR
// ============================================================================

impl Parser<'_> {
    fn nth_token(&self, n: usize) -> Option<LexToken<'_>> {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .copied()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).map_or(EOF, |t| t.kind)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_end(&self) -> bool {
        self.at(EOF)
    }

    fn at_op(&self, text: &str) -> bool {
        self.nth_token(0)
            .is_some_and(|t| t.kind == OP && t.text == text)
    }

    /// Index of the next significant token; used to detect stalls.
    fn mark(&self) -> usize {
        self.tokens[self.pos..]
            .iter()
            .position(|t| !t.kind.is_trivia())
            .map_or(self.tokens.len(), |offset| self.pos + offset)
    }

    fn eat_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.eat_trivia();
        if let Some(&token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn start(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn error_bump(&mut self) {
        self.start(ERROR);
        self.bump();
        self.finish();
    }

    /// Length in significant tokens of a type starting `start` tokens ahead.
    fn type_len(&self, start: usize) -> Option<usize> {
        let mut n = start;
        match self.nth(n) {
            PREDEFINED_TYPE | VOID_KW => n += 1,
            IDENT => {
                n += 1;
                while self.nth(n) == DOT && self.nth(n + 1) == IDENT {
                    n += 2;
                }
            }
            _ => return None,
        }
        if self.nth(n) == L_ANGLE {
            let mut depth = 0u32;
            loop {
                match self.nth(n) {
                    L_ANGLE => depth += 1,
                    R_ANGLE => {
                        depth -= 1;
                        if depth == 0 {
                            n += 1;
                            break;
                        }
                    }
                    IDENT | DOT | COMMA | PREDEFINED_TYPE | L_BRACK | R_BRACK => {}
                    _ => return None,
                }
                n += 1;
            }
        }
        while self.nth(n) == L_BRACK && self.nth(n + 1) == R_BRACK {
            n += 2;
        }
        if self.nth_token(n).is_some_and(|t| t.kind == OP && t.text == "?") {
            n += 1;
        }
        Some(n - start)
    }

    fn at_type_start(&self) -> bool {
        matches!(self.current(), IDENT | PREDEFINED_TYPE | VOID_KW)
    }

    fn at_local_decl(&self) -> bool {
        self.type_len(0).is_some_and(|len| {
            self.nth(len) == IDENT && matches!(self.nth(len + 1), EQ | SEMICOLON | COMMA)
        })
    }

    fn at_paren_lambda(&self) -> bool {
        let mut n = 1;
        while self.nth(n) == IDENT {
            n += 1;
            if self.nth(n) == COMMA {
                n += 1;
            }
        }
        self.nth(n) == R_PAREN && self.nth(n + 1) == FAT_ARROW
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

impl Parser<'_> {
    fn source_file(&mut self) {
        self.builder.start_node(SOURCE_FILE.into());
        while !self.at_end() {
            self.item();
        }
        self.eat_trivia();
        self.builder.finish_node();
    }

    fn item(&mut self) {
        match self.current() {
            USING_KW => self.using_directive(),
            NAMESPACE_KW => self.namespace_decl(),
            CLASS_KW | STATIC_KW | MODIFIER_KW => self.class_decl(),
            L_BRACK => self.attribute_list(),
            _ => self.error_bump(),
        }
    }

    fn using_directive(&mut self) {
        self.start(USING_DIRECTIVE);
        self.bump();
        self.eat(STATIC_KW);
        if self.at(IDENT) && self.nth(1) == EQ {
            self.name();
            self.bump();
        }
        self.namespace_name();
        if self.at(L_ANGLE) {
            self.type_arg_list();
        }
        self.eat(SEMICOLON);
        self.finish();
    }

    fn namespace_name(&mut self) {
        self.start(NAMESPACE_NAME);
        self.eat(IDENT);
        while self.at(DOT) && self.nth(1) == IDENT {
            self.bump();
            self.bump();
        }
        self.finish();
    }

    fn namespace_decl(&mut self) {
        self.start(NAMESPACE_DECL);
        self.bump();
        self.namespace_name();
        if self.eat(L_CURLY) {
            while !self.at(R_CURLY) && !self.at_end() {
                self.item();
            }
            self.eat(R_CURLY);
        } else {
            self.eat(SEMICOLON);
        }
        self.finish();
    }

    fn attribute_list(&mut self) {
        self.start(ATTRIBUTE_LIST);
        let mut depth = 0u32;
        loop {
            match self.current() {
                L_BRACK => depth += 1,
                R_BRACK => depth = depth.saturating_sub(1),
                EOF => break,
                _ => {}
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
        self.finish();
    }

    fn modifiers(&mut self) {
        while matches!(self.current(), MODIFIER_KW | STATIC_KW) {
            self.bump();
        }
    }

    fn class_decl(&mut self) {
        self.start(CLASS_DECL);
        self.modifiers();
        self.class_decl_rest();
        self.finish();
    }

    fn class_decl_rest(&mut self) {
        if !self.eat(CLASS_KW) {
            return;
        }
        if self.at(IDENT) {
            self.name();
        }
        if self.at(L_ANGLE) {
            self.type_param_list();
        }
        if self.at(COLON) {
            self.start(BASE_LIST);
            self.bump();
            self.ty();
            while self.eat(COMMA) {
                self.ty();
            }
            self.finish();
        }
        if self.eat(L_CURLY) {
            while !self.at(R_CURLY) && !self.at_end() {
                let mark = self.mark();
                self.member();
                if self.mark() == mark {
                    self.error_bump();
                }
            }
            self.eat(R_CURLY);
        }
    }

    fn type_param_list(&mut self) {
        self.start(TYPE_PARAM_LIST);
        self.bump();
        while self.at(IDENT) {
            self.name();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.eat(R_ANGLE);
        self.finish();
    }

    fn member(&mut self) {
        if self.at(L_BRACK) {
            self.attribute_list();
            return;
        }
        let checkpoint = self.checkpoint();
        self.modifiers();
        match self.current() {
            CLASS_KW => {
                self.start_at(checkpoint, CLASS_DECL);
                self.class_decl_rest();
                self.finish();
            }
            IDENT if self.nth(1) == L_PAREN => {
                self.start_at(checkpoint, METHOD_DECL);
                self.name();
                self.param_list();
                if self.eat(COLON) {
                    if matches!(self.current(), BASE_KW | THIS_KW) {
                        self.bump();
                    }
                    if self.at(L_PAREN) {
                        self.arg_list();
                    }
                }
                self.body();
                self.finish();
            }
            _ if self.at_type_start() => {
                self.ty();
                if self.at(IDENT) && matches!(self.nth(1), L_PAREN | L_ANGLE) {
                    self.start_at(checkpoint, METHOD_DECL);
                    self.name();
                    if self.at(L_ANGLE) {
                        self.type_param_list();
                    }
                    self.param_list();
                    self.body();
                } else {
                    self.start_at(checkpoint, FIELD_DECL);
                    self.field_rest();
                }
                self.finish();
            }
            _ => {
                self.start_at(checkpoint, ERROR);
                self.bump();
                self.finish();
            }
        }
    }

    fn field_rest(&mut self) {
        if self.at(IDENT) {
            self.name();
        }
        if self.at(L_CURLY) {
            self.accessor_list();
            if self.eat(EQ) {
                self.expr();
                self.eat(SEMICOLON);
            }
            return;
        }
        if self.eat(FAT_ARROW) {
            self.expr();
            self.eat(SEMICOLON);
            return;
        }
        if self.eat(EQ) {
            self.expr();
        }
        while self.eat(COMMA) {
            if self.at(IDENT) {
                self.name();
            }
            if self.eat(EQ) {
                self.expr();
            }
        }
        self.eat(SEMICOLON);
    }

    fn accessor_list(&mut self) {
        self.start(ACCESSOR_LIST);
        self.bump();
        while !self.at(R_CURLY) && !self.at_end() {
            match self.current() {
                L_CURLY => self.block(),
                FAT_ARROW => {
                    self.bump();
                    self.expr();
                }
                _ => self.bump(),
            }
        }
        self.eat(R_CURLY);
        self.finish();
    }

    fn param_list(&mut self) {
        self.start(PARAM_LIST);
        self.eat(L_PAREN);
        while !self.at(R_PAREN) && !self.at(L_CURLY) && !self.at_end() {
            let mark = self.mark();
            self.param();
            self.eat(COMMA);
            if self.mark() == mark {
                self.error_bump();
            }
        }
        self.eat(R_PAREN);
        self.finish();
    }

    fn param(&mut self) {
        self.start(PARAM);
        while matches!(self.current(), THIS_KW | MODIFIER_KW) {
            self.bump();
        }
        if self.at_type_start() {
            self.ty();
        }
        if self.at(IDENT) {
            self.name();
        }
        if self.eat(EQ) {
            self.expr();
        }
        self.finish();
    }

    fn body(&mut self) {
        if self.at(L_CURLY) {
            self.block();
        } else if self.eat(FAT_ARROW) {
            self.expr();
            self.eat(SEMICOLON);
        } else {
            self.eat(SEMICOLON);
        }
    }
}

// ============================================================================
// TYPES & NAMES
// ============================================================================

impl Parser<'_> {
    fn ty(&mut self) {
        self.start(TYPE);
        match self.current() {
            PREDEFINED_TYPE | VOID_KW => self.bump(),
            IDENT => self.path(),
            _ => {}
        }
        if self.at(L_ANGLE) {
            self.type_arg_list();
        }
        while self.at(L_BRACK) && self.nth(1) == R_BRACK {
            self.bump();
            self.bump();
        }
        if self.at_op("?") {
            self.bump();
        }
        self.finish();
    }

    fn path(&mut self) {
        let checkpoint = self.checkpoint();
        self.start(PATH);
        self.name_ref();
        self.finish();
        while self.at(DOT) && self.nth(1) == IDENT {
            self.start_at(checkpoint, PATH);
            self.bump();
            self.name_ref();
            self.finish();
        }
    }

    fn type_arg_list(&mut self) {
        self.start(TYPE_ARG_LIST);
        self.bump();
        loop {
            self.ty();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.eat(R_ANGLE);
        self.finish();
    }

    fn name(&mut self) {
        self.start(NAME);
        self.bump();
        self.finish();
    }

    fn name_ref(&mut self) {
        self.start(NAME_REF);
        self.bump();
        self.finish();
    }
}

// ============================================================================
// STATEMENTS
// ============================================================================

impl Parser<'_> {
    fn block(&mut self) {
        self.start(BLOCK);
        self.eat(L_CURLY);
        while !self.at(R_CURLY) && !self.at_end() {
            let mark = self.mark();
            self.stmt();
            if self.mark() == mark {
                self.error_bump();
            }
        }
        self.eat(R_CURLY);
        self.finish();
    }

    fn stmt(&mut self) {
        match self.current() {
            L_CURLY => self.block(),
            SEMICOLON => self.bump(),
            RETURN_KW => {
                self.start(RETURN_STMT);
                self.bump();
                if !self.at(SEMICOLON) && !self.at(R_CURLY) {
                    self.expr();
                }
                self.eat(SEMICOLON);
                self.finish();
            }
            IF_KW => {
                self.start(IF_STMT);
                self.bump();
                self.parenthesized_condition();
                self.stmt();
                if self.eat(ELSE_KW) {
                    self.stmt();
                }
                self.finish();
            }
            WHILE_KW => {
                self.start(WHILE_STMT);
                self.bump();
                self.parenthesized_condition();
                self.stmt();
                self.finish();
            }
            FOREACH_KW => {
                self.start(FOREACH_STMT);
                self.bump();
                self.eat(L_PAREN);
                if !self.eat(VAR_KW) {
                    self.ty();
                }
                if self.at(IDENT) {
                    self.name();
                }
                self.eat(IN_KW);
                self.expr();
                self.eat(R_PAREN);
                self.stmt();
                self.finish();
            }
            USING_KW => {
                self.start(USING_STMT);
                self.bump();
                if self.eat(L_PAREN) {
                    if self.at(VAR_KW) || self.at_local_decl() {
                        self.local_decl(false);
                    } else {
                        self.expr();
                    }
                    self.eat(R_PAREN);
                    self.stmt();
                } else if self.at(VAR_KW) || self.at_local_decl() {
                    self.local_decl(true);
                }
                self.finish();
            }
            VAR_KW => self.local_decl(true),
            _ if self.at_local_decl() => self.local_decl(true),
            _ => {
                self.start(EXPR_STMT);
                self.expr();
                self.eat(SEMICOLON);
                self.finish();
            }
        }
    }

    fn parenthesized_condition(&mut self) {
        self.eat(L_PAREN);
        self.expr();
        self.eat(R_PAREN);
    }

    fn local_decl(&mut self, terminated: bool) {
        self.start(LOCAL_DECL);
        if !self.eat(VAR_KW) {
            self.ty();
        }
        if self.at(IDENT) {
            self.name();
        }
        if self.eat(EQ) {
            self.expr();
        }
        while self.eat(COMMA) {
            if self.at(IDENT) {
                self.name();
            }
            if self.eat(EQ) {
                self.expr();
            }
        }
        if terminated {
            self.eat(SEMICOLON);
        }
        self.finish();
    }
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

impl Parser<'_> {
    fn expr(&mut self) {
        if self.at(FROM_KW) {
            self.query_expr();
            return;
        }
        let checkpoint = self.checkpoint();
        self.unary();
        if self.at_binary_op() {
            self.start_at(checkpoint, BINARY_EXPR);
            while self.at_binary_op() {
                self.bump();
                if self.at(FROM_KW) {
                    self.query_expr();
                } else {
                    self.unary();
                }
            }
            self.finish();
        }
    }

    fn at_binary_op(&self) -> bool {
        matches!(self.current(), OP | L_ANGLE | R_ANGLE | EQ | COLON)
    }

    fn unary(&mut self) {
        if matches!(self.current(), OP | AWAIT_KW) {
            self.start(PREFIX_EXPR);
            self.bump();
            self.unary();
            self.finish();
        } else {
            self.postfix();
        }
    }

    fn postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.primary();
        loop {
            match self.current() {
                DOT if self.nth(1) == IDENT => {
                    self.start_at(checkpoint, MEMBER_ACCESS);
                    self.bump();
                    self.name_ref();
                    self.finish();
                }
                L_PAREN => {
                    self.start_at(checkpoint, INVOCATION);
                    self.arg_list();
                    self.finish();
                }
                L_BRACK => {
                    self.start_at(checkpoint, ELEMENT_ACCESS);
                    self.bump();
                    while !self.at(R_BRACK) && !self.at_end() {
                        let mark = self.mark();
                        self.expr();
                        self.eat(COMMA);
                        if self.mark() == mark {
                            break;
                        }
                    }
                    self.eat(R_BRACK);
                    self.finish();
                }
                _ => break,
            }
        }
    }

    fn primary(&mut self) {
        match self.current() {
            STRING | CHAR | NUMBER | TRUE_KW | FALSE_KW | NULL_KW => {
                self.start(LITERAL);
                self.bump();
                self.finish();
            }
            THIS_KW | BASE_KW => {
                self.start(THIS_EXPR);
                self.bump();
                self.finish();
            }
            NEW_KW => self.object_creation(),
            L_PAREN if self.at_paren_lambda() => self.lambda(),
            L_PAREN => {
                self.start(PAREN_EXPR);
                self.bump();
                self.expr();
                self.eat(R_PAREN);
                self.finish();
            }
            IDENT if self.nth(1) == FAT_ARROW => self.lambda(),
            IDENT => self.name_ref(),
            PREDEFINED_TYPE => {
                self.start(TYPE);
                self.bump();
                self.finish();
            }
            FROM_KW => self.query_expr(),
            _ => {}
        }
    }

    fn object_creation(&mut self) {
        self.start(OBJECT_CREATION);
        self.bump();
        if self.at_type_start() {
            self.ty();
        }
        while self.at(L_BRACK) && self.nth(1) == R_BRACK {
            self.bump();
            self.bump();
        }
        if self.at(L_PAREN) {
            self.arg_list();
        }
        if self.at(L_CURLY) {
            self.initializer();
        }
        self.finish();
    }

    fn initializer(&mut self) {
        self.start(INITIALIZER);
        self.bump();
        while !self.at(R_CURLY) && !self.at_end() {
            let mark = self.mark();
            if self.at(IDENT) && self.nth(1) == EQ {
                self.bump();
                self.bump();
            }
            self.expr();
            self.eat(COMMA);
            if self.mark() == mark {
                self.error_bump();
            }
        }
        self.eat(R_CURLY);
        self.finish();
    }

    fn arg_list(&mut self) {
        self.start(ARG_LIST);
        self.bump();
        while !self.at(R_PAREN) && !self.at_end() {
            let mark = self.mark();
            while self.at(MODIFIER_KW) {
                self.bump();
            }
            self.expr();
            self.eat(COMMA);
            if self.mark() == mark {
                break;
            }
        }
        self.eat(R_PAREN);
        self.finish();
    }

    fn lambda(&mut self) {
        self.start(LAMBDA_EXPR);
        if self.at(L_PAREN) {
            self.start(PARAM_LIST);
            self.bump();
            while self.at(IDENT) {
                self.start(PARAM);
                self.name();
                self.finish();
                self.eat(COMMA);
            }
            self.eat(R_PAREN);
            self.finish();
        } else {
            self.start(PARAM);
            self.name();
            self.finish();
        }
        self.eat(FAT_ARROW);
        if self.at(L_CURLY) {
            self.block();
        } else {
            self.expr();
        }
        self.finish();
    }

    fn query_expr(&mut self) {
        self.start(QUERY_EXPR);
        self.from_clause();
        loop {
            match self.current() {
                FROM_KW => self.from_clause(),
                WHERE_KW => {
                    self.start(WHERE_CLAUSE);
                    self.bump();
                    self.expr();
                    self.finish();
                }
                SELECT_KW => {
                    self.start(SELECT_CLAUSE);
                    self.bump();
                    self.expr();
                    self.finish();
                    break;
                }
                _ => break,
            }
        }
        self.finish();
    }

    fn from_clause(&mut self) {
        self.start(FROM_CLAUSE);
        self.bump();
        if self.type_len(0).is_some_and(|len| self.nth(len) == IDENT) {
            self.ty();
        }
        if self.at(IDENT) {
            self.name();
        }
        self.eat(IN_KW);
        self.expr();
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(text: &str) -> SyntaxNode {
        parse(text).unwrap().syntax()
    }

    fn count(root: &SyntaxNode, kind: SyntaxKind) -> usize {
        root.descendants().filter(|n| n.kind() == kind).count()
    }

    fn texts(root: &SyntaxNode, kind: SyntaxKind) -> Vec<String> {
        root.descendants()
            .filter(|n| n.kind() == kind)
            .map(|n| n.text().to_string())
            .collect()
    }

    #[test]
    fn test_tree_is_lossless() {
        let text = "\nusing ns2;\nusing ns1;\n\npublic class test {\n    class1 ns1 = new class1();\n}\n";
        assert_eq!(tree(text).text().to_string(), text);
    }

    #[test]
    fn test_using_directives() {
        let root = tree("using System;\nusing IO = System.IO;\nusing static System.Math;\n");
        assert_eq!(count(&root, USING_DIRECTIVE), 3);
        assert_eq!(
            texts(&root, NAMESPACE_NAME),
            vec!["System", "System.IO", "System.Math"]
        );
        assert_eq!(texts(&root, NAME), vec!["IO"]);
    }

    #[test]
    fn test_class_without_name() {
        let root = tree("using System;\npublic class {}");
        assert_eq!(count(&root, CLASS_DECL), 1);
        assert_eq!(count(&root, NAME), 0);
        assert_eq!(count(&root, ERROR), 0);
    }

    #[test]
    fn test_field_constructor_and_method() {
        let root = tree(
            "class test {\n    class1 a = new class1();\n    public test() { Console.WriteLine(\"x\"); }\n    static void Run(this string s) {}\n}",
        );
        assert_eq!(count(&root, FIELD_DECL), 1);
        assert_eq!(count(&root, METHOD_DECL), 2);
        assert_eq!(count(&root, OBJECT_CREATION), 1);
        assert_eq!(texts(&root, MEMBER_ACCESS), vec!["Console.WriteLine"]);
        assert_eq!(count(&root, ERROR), 0);
    }

    #[test]
    fn test_node_ranges_exclude_trivia() {
        let root = tree("class A {   Foo   f; }");
        let name_ref = root
            .descendants()
            .find(|n| n.kind() == NAME_REF)
            .unwrap();
        assert_eq!(name_ref.text().to_string(), "Foo");
        assert_eq!(u32::from(name_ref.text_range().start()), 12);
    }

    #[test]
    fn test_qualified_type_is_left_nested() {
        let root = tree("class A { System.Text.StringBuilder b; }");
        assert_eq!(
            texts(&root, PATH),
            vec!["System.Text.StringBuilder", "System.Text", "System"]
        );
    }

    #[test]
    fn test_local_declarations_and_statements() {
        let root = tree(
            "class A { void M() {\n var x = 1;\n List<int> xs = new List<int>();\n foreach (var y in xs) { y.ToString(); }\n if (x > 0) return; else { }\n} }",
        );
        assert_eq!(count(&root, LOCAL_DECL), 2);
        assert_eq!(count(&root, FOREACH_STMT), 1);
        assert_eq!(count(&root, IF_STMT), 1);
        assert_eq!(count(&root, TYPE_ARG_LIST), 2);
        assert_eq!(count(&root, ERROR), 0);
    }

    #[test]
    fn test_query_expression() {
        let root = tree("class A { void M(int[] xs) { var q = from x in xs where x > 1 select x; } }");
        assert_eq!(count(&root, QUERY_EXPR), 1);
        assert_eq!(count(&root, FROM_CLAUSE), 1);
        assert_eq!(count(&root, WHERE_CLAUSE), 1);
        assert_eq!(count(&root, SELECT_CLAUSE), 1);
    }

    #[test]
    fn test_lambdas() {
        let root = tree("class A { void M() { xs.Where(x => x > 1).Select((a, b) => a); } }");
        assert_eq!(count(&root, LAMBDA_EXPR), 2);
        assert_eq!(count(&root, PARAM), 3);
    }

    #[test]
    fn test_garbage_is_wrapped_not_dropped() {
        let text = "} ) class A { ; ] }";
        let root = tree(text);
        assert_eq!(root.text().to_string(), text);
        assert!(count(&root, ERROR) >= 2);
    }

    #[test]
    fn test_lex_error_fails_parse() {
        assert!(parse("class A { $ }").is_err());
    }
}
