//! Collaborator seams of the fix engine.
//!
//! The engine never parses, resolves or formats code itself. It drives a
//! [`SnapshotProvider`] and a [`CodeActions`] implementation, and applies
//! whatever edits they hand back through an
//! [`EditScript`](crate::ide::edit::EditScript).

use std::fmt;

use smol_str::SmolStr;

use super::FixError;
use crate::base::{LineCol, SourceBuffer, TextRange};
use crate::hir::ResolutionOutcome;
use crate::ide::edit::TextEdit;

/// Turns a buffer into a queryable snapshot.
pub trait SnapshotProvider {
    type Snapshot: Snapshot;

    /// Snapshot exactly `buffer`. Must be deterministic.
    fn snapshot(&self, buffer: &SourceBuffer) -> Result<Self::Snapshot, FixError>;
}

/// A parsed and resolvable view of one buffer state.
pub trait Snapshot {
    type Node: Clone + PartialEq + fmt::Debug;

    /// Every node, depth-first in document order.
    fn preorder(&self) -> Vec<Self::Node>;

    /// `node` and everything under it, depth-first.
    fn descendants(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Source text of `node`.
    fn text(&self, node: &Self::Node) -> String;

    /// Source range of `node`.
    fn range(&self, node: &Self::Node) -> TextRange;

    /// Where `node` starts.
    fn start(&self, node: &Self::Node) -> LineCol;

    /// How `node` resolves in this snapshot.
    fn resolve(&self, node: &Self::Node) -> Result<ResolutionOutcome, FixError>;

    /// Import directives in document order.
    fn imports(&self) -> Vec<ImportSite<Self::Node>>;

    /// The first query-syntax expression, if any.
    fn first_query(&self) -> Option<Self::Node>;
}

/// One import directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSite<N> {
    /// Imported (or aliased) namespace.
    pub namespace: SmolStr,
    /// Alias name for `using X = ...;`.
    pub alias: Option<SmolStr>,
    pub node: N,
}

impl<N> ImportSite<N> {
    /// Whether this is a plain namespace import.
    pub fn is_plain(&self) -> bool {
        self.alias.is_none()
    }
}

/// Where a code action is requested.
pub struct EditContext<'a, S> {
    pub buffer: &'a SourceBuffer,
    pub snapshot: &'a S,
    pub position: LineCol,
}

impl<S> Clone for EditContext<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for EditContext<'_, S> {}

impl<S> fmt::Debug for EditContext<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditContext")
            .field("file", &self.buffer.file())
            .field("position", &self.position)
            .finish()
    }
}

/// One way to bind a reference: import `namespace` with `edits`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportCandidate {
    pub namespace: SmolStr,
    pub edits: Vec<TextEdit>,
}

/// Import-related code actions over snapshots of type `Self::Snapshot`.
pub trait CodeActions {
    type Snapshot: Snapshot;

    /// Imports that would bind the reference at the context position, in a
    /// stable order.
    fn import_candidates(
        &self,
        ctx: &EditContext<'_, Self::Snapshot>,
    ) -> Result<Vec<ImportCandidate>, FixError>;

    /// Edits removing unused and duplicate imports.
    fn redundant_imports(&self, ctx: &EditContext<'_, Self::Snapshot>) -> Result<Vec<TextEdit>, FixError>;

    /// Edits putting imports in canonical order.
    fn sort_imports(&self, ctx: &EditContext<'_, Self::Snapshot>) -> Result<Vec<TextEdit>, FixError>;

    /// Edits importing `namespace` and dropping qualifiers it makes redundant.
    fn add_import(
        &self,
        ctx: &EditContext<'_, Self::Snapshot>,
        namespace: &str,
    ) -> Result<Vec<TextEdit>, FixError>;

    /// Namespace that query syntax needs.
    fn query_namespace(&self) -> &str;
}
