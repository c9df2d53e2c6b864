//! Import code actions for C# buffers.
//!
//! - Import candidates for an unresolved name
//! - Redundant (unused or duplicate) using directives
//! - Canonical using order
//! - Adding an import and dropping the qualifiers it makes redundant

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::edit::TextEdit;
use super::fix_imports::{CodeActions, EditContext, FixError, ImportCandidate};
use super::snapshot::CSharpSnapshot;
use crate::base::{TextRange, TextSize};
use crate::hir::{ImportUsage, LINQ_NAMESPACE, namespace_chain};
use crate::syntax::{SyntaxKind, SyntaxNode, ast};

/// Code actions over [`CSharpSnapshot`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct CSharpCodeActions;

impl CSharpCodeActions {
    pub fn new() -> Self {
        Self
    }
}

impl CodeActions for CSharpCodeActions {
    type Snapshot = CSharpSnapshot;

    fn import_candidates(&self, ctx: &EditContext<'_, CSharpSnapshot>) -> Result<Vec<ImportCandidate>, FixError> {
        let snapshot = ctx.snapshot;
        let offset = snapshot
            .line_index()
            .offset(ctx.position)
            .ok_or_else(|| FixError::CodeAction {
                action: "import_candidates",
                message: format!("position {} is outside the buffer", ctx.position),
            })?;
        let Some(name_ref) = name_ref_at(snapshot.root(), offset) else {
            return Ok(Vec::new());
        };

        let name = ast::compact_text(&name_ref);
        let symbols = snapshot.symbols();
        let namespaces = if snapshot.resolver().is_identifier_position(&name_ref) {
            symbols.namespaces_with_type(&name)
        } else if name_ref
            .parent()
            .is_some_and(|parent| parent.kind() == SyntaxKind::MEMBER_ACCESS)
        {
            symbols.namespaces_with_extension(&name)
        } else {
            Vec::new()
        };

        let enclosing = ast::enclosing_namespace(&name_ref);
        let visible: Vec<&str> = namespace_chain(&enclosing).collect();
        let imports = snapshot.import_scope();

        Ok(namespaces
            .into_iter()
            .filter(|namespace| !imports.imports_namespace(namespace) && !visible.contains(&namespace.as_str()))
            .map(|namespace| ImportCandidate {
                edits: vec![insert_using(ctx.buffer.text(), snapshot, &namespace)],
                namespace,
            })
            .collect())
    }

    fn redundant_imports(&self, ctx: &EditContext<'_, CSharpSnapshot>) -> Result<Vec<TextEdit>, FixError> {
        let snapshot = ctx.snapshot;
        let text = ctx.buffer.text();
        let usage = ImportUsage::compute(&snapshot.resolver(), snapshot.root());
        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();

        Ok(snapshot
            .using_directives()
            .filter(|directive| {
                let first = seen.insert(ast::compact_text(directive));
                !first || !usage.is_used(directive)
            })
            .map(|directive| TextEdit::delete(removal_range(text, snapshot, &directive)))
            .collect())
    }

    fn sort_imports(&self, ctx: &EditContext<'_, CSharpSnapshot>) -> Result<Vec<TextEdit>, FixError> {
        let mut edits = Vec::new();

        let containers = ctx.snapshot.root().descendants().filter(|node| {
            matches!(node.kind(), SyntaxKind::SOURCE_FILE | SyntaxKind::NAMESPACE_DECL)
        });
        for container in containers {
            let slots: Vec<SyntaxNode> = ast::children_of_kind(&container, SyntaxKind::USING_DIRECTIVE).collect();
            if slots.len() < 2 {
                continue;
            }
            let mut sorted = slots.clone();
            sorted.sort_by_cached_key(sort_key);

            for (slot, directive) in slots.iter().zip(&sorted) {
                let replacement = directive.text().to_string();
                if slot.text() != replacement.as_str() {
                    edits.push(TextEdit::replace(slot.text_range(), replacement));
                }
            }
        }

        Ok(edits)
    }

    fn add_import(&self, ctx: &EditContext<'_, CSharpSnapshot>, namespace: &str) -> Result<Vec<TextEdit>, FixError> {
        let snapshot = ctx.snapshot;
        let mut edits = Vec::new();

        if !snapshot.import_scope().imports_namespace(namespace) {
            edits.push(insert_using(ctx.buffer.text(), snapshot, namespace));
        }

        for node in snapshot.root().descendants() {
            let qualified = match node.kind() {
                SyntaxKind::PATH => node
                    .first_child()
                    .filter(|qualifier| qualifier.kind() == SyntaxKind::PATH)
                    .zip(node.children().filter(|c| c.kind() == SyntaxKind::NAME_REF).last()),
                SyntaxKind::MEMBER_ACCESS => node
                    .first_child()
                    .filter(|receiver| matches!(receiver.kind(), SyntaxKind::NAME_REF | SyntaxKind::MEMBER_ACCESS))
                    .zip(node.children().filter(|c| c.kind() == SyntaxKind::NAME_REF).last())
                    .filter(|(receiver, member)| receiver != member),
                _ => None,
            };
            if let Some((qualifier, tail)) = qualified {
                if ast::compact_text(&qualifier) == namespace {
                    edits.push(TextEdit::delete(TextRange::new(
                        qualifier.text_range().start(),
                        tail.text_range().start(),
                    )));
                }
            }
        }

        Ok(edits)
    }

    fn query_namespace(&self) -> &str {
        LINQ_NAMESPACE
    }
}

/// The `NAME_REF` whose first token starts at or covers `offset`.
fn name_ref_at(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxNode> {
    root.token_at_offset(offset)
        .right_biased()?
        .parent_ancestors()
        .find(|node| node.kind() == SyntaxKind::NAME_REF)
}

/// Plain usings first, then aliases, then `using static`; each by name.
fn sort_key(directive: &SyntaxNode) -> (u8, SmolStr, String) {
    let text = directive.text().to_string();
    if ast::is_alias_using(directive) {
        (1, ast::name_text(directive).unwrap_or_default(), text)
    } else if ast::is_static_using(directive) {
        (2, ast::namespace_name(directive).unwrap_or_default(), text)
    } else {
        (0, ast::namespace_name(directive).unwrap_or_default(), text)
    }
}

/// Start offset of the line containing `offset`.
fn line_start(snapshot: &CSharpSnapshot, offset: TextSize) -> TextSize {
    let index = snapshot.line_index();
    index
        .line_range(index.line_col(offset).line)
        .map_or(offset, |range| range.start())
}

/// End offset (after the newline) of the line containing `offset`.
fn line_end(snapshot: &CSharpSnapshot, offset: TextSize) -> TextSize {
    let index = snapshot.line_index();
    index
        .line_range(index.line_col(offset).line)
        .map_or(offset, |range| range.end())
}

/// The whole line(s) of `directive` when nothing else shares them, else just
/// the directive.
fn removal_range(text: &str, snapshot: &CSharpSnapshot, directive: &SyntaxNode) -> TextRange {
    let range = directive.text_range();
    let start = line_start(snapshot, range.start());
    let end = line_end(snapshot, range.end());

    let before = &text[usize::from(start)..usize::from(range.start())];
    let after = &text[usize::from(range.end())..usize::from(end)];
    if before.trim().is_empty() && after.trim().is_empty() {
        TextRange::new(start, end)
    } else {
        range
    }
}

/// The buffer's line terminator, judged by its first line break.
fn line_ending(text: &str) -> &'static str {
    match text.find('\n') {
        Some(newline) if text[..newline].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// An edit inserting `using namespace;` among the top-level usings, keeping
/// plain usings sorted.
fn insert_using(text: &str, snapshot: &CSharpSnapshot, namespace: &str) -> TextEdit {
    let eol = line_ending(text);
    let line = format!("using {namespace};");
    let directives: Vec<SyntaxNode> =
        ast::children_of_kind(snapshot.root(), SyntaxKind::USING_DIRECTIVE).collect();
    let plain: Vec<&SyntaxNode> = directives
        .iter()
        .filter(|d| !ast::is_alias_using(d) && !ast::is_static_using(d))
        .collect();

    let after_namespace = plain.iter().find(|d| {
        ast::namespace_name(d).is_some_and(|existing| existing.as_str() > namespace)
    });
    if let Some(next) = after_namespace {
        return TextEdit::insert(line_start(snapshot, next.text_range().start()), format!("{line}{eol}"));
    }
    if let Some(last) = plain.last() {
        let end = line_end(snapshot, last.text_range().end());
        return if text[..usize::from(end)].ends_with('\n') {
            TextEdit::insert(end, format!("{line}{eol}"))
        } else {
            TextEdit::insert(end, format!("{eol}{line}"))
        };
    }
    if let Some(first) = directives.first() {
        return TextEdit::insert(line_start(snapshot, first.text_range().start()), format!("{line}{eol}"));
    }
    TextEdit::insert(TextSize::from(0), format!("{line}{eol}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, LineCol, SourceBuffer};
    use crate::ide::edit::apply_edits;
    use crate::ide::fix_imports::SnapshotProvider;
    use crate::ide::snapshot::CSharpSnapshotProvider;

    fn with_ctx<R>(text: &str, position: LineCol, f: impl FnOnce(&EditContext<'_, CSharpSnapshot>) -> R) -> R {
        let buffer = SourceBuffer::new(FileId::new(0), "a.cs", text);
        let snapshot = CSharpSnapshotProvider::default().snapshot(&buffer).unwrap();
        let ctx = EditContext {
            buffer: &buffer,
            snapshot: &snapshot,
            position,
        };
        f(&ctx)
    }

    fn run(text: &str, f: impl FnOnce(&EditContext<'_, CSharpSnapshot>) -> Vec<TextEdit>) -> String {
        let edits = with_ctx(text, LineCol::new(0, 0), f);
        apply_edits(text, &edits).unwrap()
    }

    #[test]
    fn test_candidates_for_type() {
        let text = "class A { Console c; }\nnamespace Acme { class Console {} }";
        let candidates = with_ctx(text, LineCol::new(0, 10), |ctx| {
            CSharpCodeActions.import_candidates(ctx).unwrap()
        });
        let namespaces: Vec<&str> = candidates.iter().map(|c| c.namespace.as_str()).collect();
        assert_eq!(namespaces, vec!["Acme", "System"]);
        assert_eq!(
            candidates[1].edits,
            vec![TextEdit::insert(TextSize::from(0), "using System;\n")]
        );
    }

    #[test]
    fn test_candidates_for_extension_member() {
        let text = "class A { void M() { \"s\".Whatever(); } }\nnamespace ns1 { static class E { public static void Whatever(this string s) {} } }";
        let candidates = with_ctx(text, LineCol::new(0, 25), |ctx| {
            CSharpCodeActions.import_candidates(ctx).unwrap()
        });
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].namespace, "ns1");
    }

    #[test]
    fn test_candidates_skip_imported_and_enclosing() {
        let text = "using Acme;\nnamespace Acme.Inner { class A { Console c; } }\nnamespace Acme { class Console {} }";
        let candidates = with_ctx(text, LineCol::new(1, 33), |ctx| {
            CSharpCodeActions.import_candidates(ctx).unwrap()
        });
        let namespaces: Vec<&str> = candidates.iter().map(|c| c.namespace.as_str()).collect();
        assert_eq!(namespaces, vec!["System"]);
    }

    #[test]
    fn test_candidate_position_out_of_range() {
        let err = with_ctx("class A {}", LineCol::new(4, 0), |ctx| {
            CSharpCodeActions.import_candidates(ctx).unwrap_err()
        });
        assert!(matches!(err, FixError::CodeAction { action: "import_candidates", .. }));
    }

    #[test]
    fn test_insert_keeps_usings_sorted() {
        let text = "using Alpha;\nusing Gamma;\nclass A {}";
        let edit = with_ctx(text, LineCol::new(0, 0), |ctx| insert_using(text, ctx.snapshot, "Beta"));
        assert_eq!(
            apply_edits(text, &[edit]).unwrap(),
            "using Alpha;\nusing Beta;\nusing Gamma;\nclass A {}"
        );

        let text = "using Alpha;";
        let edit = with_ctx(text, LineCol::new(0, 0), |ctx| insert_using(text, ctx.snapshot, "Zeta"));
        assert_eq!(apply_edits(text, &[edit]).unwrap(), "using Alpha;\nusing Zeta;");
    }

    #[test]
    fn test_insert_follows_crlf_line_endings() {
        assert_eq!(line_ending("class A {}"), "\n");
        assert_eq!(line_ending("a\nb\r\n"), "\n");

        let text = "using Alpha;\r\nusing Gamma;\r\nclass A {}";
        let edit = with_ctx(text, LineCol::new(0, 0), |ctx| insert_using(text, ctx.snapshot, "Beta"));
        assert_eq!(
            apply_edits(text, &[edit]).unwrap(),
            "using Alpha;\r\nusing Beta;\r\nusing Gamma;\r\nclass A {}"
        );

        let text = "using Alpha;\r\nclass A {}";
        let edit = with_ctx(text, LineCol::new(0, 0), |ctx| insert_using(text, ctx.snapshot, "Zeta"));
        assert_eq!(
            apply_edits(text, &[edit]).unwrap(),
            "using Alpha;\r\nusing Zeta;\r\nclass A {}"
        );
    }

    #[test]
    fn test_redundant_removes_unused_and_duplicates() {
        let text = "using System;\nusing System.IO;\nusing System;\nclass A { void M() { Console.Write(1); } }";
        let fixed = run(text, |ctx| CSharpCodeActions.redundant_imports(ctx).unwrap());
        assert_eq!(fixed, "using System;\nclass A { void M() { Console.Write(1); } }");
    }

    #[test]
    fn test_redundant_shared_line_removes_only_directive() {
        let text = "using System.IO; class A {}";
        let fixed = run(text, |ctx| CSharpCodeActions.redundant_imports(ctx).unwrap());
        assert_eq!(fixed, " class A {}");
    }

    #[test]
    fn test_sort_orders_plain_alias_static() {
        let text = "using static System.Math;\nusing Z = System.Text;\nusing ns2;\nusing ns1;\nclass A {}";
        let fixed = run(text, |ctx| CSharpCodeActions.sort_imports(ctx).unwrap());
        assert_eq!(
            fixed,
            "using ns1;\nusing ns2;\nusing Z = System.Text;\nusing static System.Math;\nclass A {}"
        );
    }

    #[test]
    fn test_sort_is_noop_when_ordered() {
        let edits = with_ctx("using A;\nusing B;\n", LineCol::new(0, 0), |ctx| {
            CSharpCodeActions.sort_imports(ctx).unwrap()
        });
        assert!(edits.is_empty());
    }

    #[test]
    fn test_add_import_drops_qualifiers() {
        let text = "class A { void M() { var xs = System.Linq.Enumerable.Range(1, 2); System.Linq.Enumerable e; } }";
        let fixed = run(text, |ctx| CSharpCodeActions.add_import(ctx, "System.Linq").unwrap());
        assert_eq!(
            fixed,
            "using System.Linq;\nclass A { void M() { var xs = Enumerable.Range(1, 2); Enumerable e; } }"
        );
    }
}
