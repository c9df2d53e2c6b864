//! Errors raised by collaborators during a fix run.

use std::sync::Arc;

use crate::ide::edit::EditError;
use crate::syntax::SyntaxError;

/// A collaborator failure. Any of these aborts the run for that buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixError {
    /// The buffer could not be turned into a snapshot.
    #[error("cannot parse {file}: {source}")]
    Parse {
        file: Arc<str>,
        #[source]
        source: SyntaxError,
    },
    /// The resolver failed on a node.
    #[error("cannot resolve `{node}`: {message}")]
    Resolve { node: String, message: String },
    /// A code action could not be computed.
    #[error("code action `{action}` failed: {message}")]
    CodeAction {
        action: &'static str,
        message: String,
    },
    /// Edits could not be applied.
    #[error(transparent)]
    Edit(#[from] EditError),
}
