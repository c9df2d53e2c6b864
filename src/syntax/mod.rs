//! Syntax layer for the C# subset: tokens, lossless trees and tree helpers.
//!
//! ```text
//! text ──lexer──▶ tokens ──parser──▶ rowan green tree ──▶ SyntaxNode
//! ```

pub mod ast;
pub mod kind;
pub mod lexer;
pub mod parser;

pub use kind::{CSharpLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use parser::{Parse, parse};

/// A failure to turn source text into a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// The lexer hit input that starts no token.
    #[error("unexpected character {text:?} at offset {offset}")]
    UnexpectedCharacter { offset: usize, text: String },
}
