//! Whole-buffer import passes run before the resolution loop.
//!
//! Each pass snapshots the buffer it receives and returns the next buffer;
//! a pass with nothing to do returns its input unchanged.

use super::FixError;
use super::traits::{CodeActions, EditContext, Snapshot, SnapshotProvider};
use crate::base::SourceBuffer;
use crate::ide::edit::{EditScript, TextEdit};

fn commit(buffer: &SourceBuffer, edits: Vec<TextEdit>) -> Result<SourceBuffer, FixError> {
    let mut script = EditScript::begin(buffer);
    script.apply(edits);
    Ok(script.commit()?)
}

/// Delete imports nothing references.
pub fn remove_redundant_imports<P, A>(
    provider: &P,
    actions: &A,
    buffer: SourceBuffer,
) -> Result<SourceBuffer, FixError>
where
    P: SnapshotProvider,
    A: CodeActions<Snapshot = P::Snapshot>,
{
    let snapshot = provider.snapshot(&buffer)?;
    let imports = snapshot.imports();
    let Some(first) = imports.first() else {
        return Ok(buffer);
    };

    let ctx = EditContext {
        buffer: &buffer,
        snapshot: &snapshot,
        position: snapshot.start(&first.node),
    };
    let edits = actions.redundant_imports(&ctx)?;
    if edits.is_empty() {
        return Ok(buffer);
    }

    tracing::debug!(file = buffer.name(), edits = edits.len(), "removing redundant imports");
    commit(&buffer, edits)
}

/// Put imports in canonical order.
pub fn sort_imports<P, A>(provider: &P, actions: &A, buffer: SourceBuffer) -> Result<SourceBuffer, FixError>
where
    P: SnapshotProvider,
    A: CodeActions<Snapshot = P::Snapshot>,
{
    let snapshot = provider.snapshot(&buffer)?;
    let imports = snapshot.imports();
    if imports.len() < 2 {
        return Ok(buffer);
    }

    let ctx = EditContext {
        buffer: &buffer,
        snapshot: &snapshot,
        position: snapshot.start(&imports[0].node),
    };
    let edits = actions.sort_imports(&ctx)?;
    if edits.is_empty() {
        return Ok(buffer);
    }

    tracing::debug!(file = buffer.name(), edits = edits.len(), "sorting imports");
    commit(&buffer, edits)
}

/// Import the query namespace when query syntax needs it.
pub fn ensure_query_import<P, A>(
    provider: &P,
    actions: &A,
    buffer: SourceBuffer,
) -> Result<SourceBuffer, FixError>
where
    P: SnapshotProvider,
    A: CodeActions<Snapshot = P::Snapshot>,
{
    let snapshot = provider.snapshot(&buffer)?;
    let Some(query) = snapshot.first_query() else {
        return Ok(buffer);
    };
    let namespace = actions.query_namespace();
    if snapshot
        .imports()
        .iter()
        .any(|site| site.is_plain() && site.namespace == namespace)
    {
        return Ok(buffer);
    }

    let ctx = EditContext {
        buffer: &buffer,
        snapshot: &snapshot,
        position: snapshot.start(&query),
    };
    let edits = actions.add_import(&ctx, namespace)?;
    tracing::debug!(file = buffer.name(), namespace, "adding query import");
    commit(&buffer, edits)
}
